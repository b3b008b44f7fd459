pub mod simulated;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::AssistantBox;
use crate::domain::models::AssistantName;

pub struct AssistantManager {}

impl AssistantManager {
    pub fn get(name: AssistantName) -> Result<AssistantBox> {
        if name == AssistantName::Simulated {
            return Ok(Box::<simulated::Simulated>::default());
        }

        bail!(format!("No assistant implemented for {name}"))
    }
}
