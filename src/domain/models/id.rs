use uuid::Uuid;

/// Short unique identifier built from the first two segments of a v4 UUID.
/// Used for both messages and attached files.
pub fn new_id() -> String {
    return Uuid::new_v4()
        .to_string()
        .split('-')
        .enumerate()
        .filter_map(|(idx, str)| {
            if idx > 1 {
                return None;
            }
            return Some(str);
        })
        .collect::<Vec<&str>>()
        .join("-");
}
