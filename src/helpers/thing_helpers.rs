use surrealdb::sql::{Id, Thing};

/// Parse un ID depuis différents formats possibles
pub fn parse_id_part(id: &str) -> &str {
    // "tb:id" -> "id"
    if let Some(id_part) = id.split_once(':').map(|(_, key)| key) {
        id_part
    } else {
        id
    }
}

/// Thing for a user record
pub fn create_user_thing(user_id: &str) -> Thing {
    let clean_id = parse_id_part(user_id);
    Thing::from(("user".to_string(), clean_id.to_string()))
}

/// Thing for a playlist record
pub fn create_playlist_thing(playlist_id: &str) -> Thing {
    let clean_id = parse_id_part(playlist_id);
    Thing::from(("playlist".to_string(), clean_id.to_string()))
}

/// Raw key of a record id, without the table prefix or escaping brackets.
pub fn thing_key(thing: &Thing) -> String {
    match &thing.id {
        Id::String(key) => key.clone(),
        Id::Number(key) => key.to_string(),
        other => other.to_string(),
    }
}

/// Fresh random key for a new record.
pub fn new_record_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_part() {
        assert_eq!(parse_id_part("user:123"), "123");
        assert_eq!(parse_id_part("123"), "123");
        assert_eq!(parse_id_part("playlist:test_playlist"), "test_playlist");
    }

    #[test]
    fn test_create_things() {
        let user_thing = create_user_thing("user:12");
        assert_eq!(user_thing.tb, "user");
        assert_eq!(thing_key(&user_thing), "12");

        let playlist_thing = create_playlist_thing("90");
        assert_eq!(playlist_thing.tb, "playlist");
        assert_eq!(thing_key(&playlist_thing), "90");
    }

    #[test]
    fn test_new_record_keys_are_unique_hex() {
        let first = new_record_key();
        let second = new_record_key();

        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
