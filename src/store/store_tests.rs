//! Unit tests for the persistence gateway

#[cfg(test)]
mod tests {
    use crate::model::{Photo, UserList};
    use crate::store::{DataFormat, Store, StoreError};
    use crate::testing::{at, at_time, sample_user};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn populated() -> UserList {
        let mut users = UserList::new();
        users.insert_user(sample_user()).unwrap();
        let bob = users.add_user("bob").unwrap();
        bob.add_tag_type("mood", false);
        bob.add_album("empty").unwrap();
        bob.add_album("mixed").unwrap();
        bob.import_photo("mixed", Photo::new("z.jpg", at_time(2022, 2, 2, 14, 5, 9)))
            .unwrap();
        bob.import_photo("mixed", Photo::new("a.jpg", at(2021, 1, 1))).unwrap();
        bob.set_caption("z.jpg", "last but first").unwrap();
        bob.tag_photo("z.jpg", "mood", "calm").unwrap();
        users
    }

    fn assert_same_graph(loaded: &UserList, original: &UserList) {
        assert_eq!(loaded.usernames(), original.usernames());
        for user in original.users() {
            let other = loaded.user(user.username()).unwrap();
            assert_eq!(other.album_names(), user.album_names());
            assert_eq!(other.tag_types(), user.tag_types());
            for (a, b) in user.tag_types().iter().zip(other.tag_types()) {
                assert_eq!(a.allows_multiple_values(), b.allows_multiple_values());
            }
            for album in user.albums() {
                let other_album = other.album(album.name()).unwrap();
                assert_eq!(other_album.photo_paths(), album.photo_paths());
            }
            for photo in user.library().iter() {
                let other_photo = other.photo(photo.path()).unwrap();
                assert_eq!(other_photo.caption(), photo.caption());
                assert_eq!(other_photo.date_taken(), photo.date_taken());
                assert_eq!(other_photo.tags(), photo.tags());
            }
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DataFormat::from_path(Path::new("data.json")), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("DATA.JSON")), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("photos_app_data.dat")), DataFormat::Binary);
        assert_eq!(DataFormat::from_path(Path::new("noext")), DataFormat::Binary);
    }

    #[test]
    fn test_format_parse_and_display() {
        assert_eq!("JSON".parse::<DataFormat>().unwrap(), DataFormat::Json);
        assert_eq!("binary".parse::<DataFormat>().unwrap(), DataFormat::Binary);
        assert!("xml".parse::<DataFormat>().is_err());
        assert_eq!(DataFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_binary_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("photos_app_data.dat"));
        assert_eq!(store.format(), DataFormat::Binary);

        let users = populated();
        store.save(&users).unwrap();
        let loaded = store.load().unwrap();
        assert_same_graph(&loaded, &users);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("data.json"));
        assert_eq!(store.format(), DataFormat::Json);

        let users = populated();
        store.save(&users).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"louvre.jpg\""));

        let loaded = store.load().unwrap();
        assert_same_graph(&loaded, &users);
    }

    #[test]
    fn test_round_trip_keeps_stock_guard() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("data.dat"));
        let mut users = UserList::new();
        users
            .add_user("stock")
            .unwrap()
            .seed_album("stock", vec![Photo::new("s1.jpg", at(2020, 1, 1))])
            .unwrap();
        store.save(&users).unwrap();

        let mut loaded = store.load().unwrap();
        let stock = loaded.user_mut("stock").unwrap();
        assert!(stock.album("stock").unwrap().is_stock());
        assert!(stock.import_photo("stock", Photo::new("x.jpg", at(2020, 1, 2))).is_err());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("data.dat");
        Store::open(&path).save(&UserList::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("data.dat"));
        store.save(&populated()).unwrap();
        store.save(&UserList::new()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("absent.dat"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_garbage_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = Store::open(&path);
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_load_trailing_bytes_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("data.dat"));
        store.save(&populated()).unwrap();

        let mut bytes = fs::read(store.path()).unwrap();
        bytes.extend_from_slice(&[0xde, 0xad]);
        fs::write(store.path(), &bytes).unwrap();

        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_load_truncated_binary_fails() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("data.dat"));
        store.save(&populated()).unwrap();

        let bytes = fs::read(store.path()).unwrap();
        fs::write(store.path(), &bytes[..bytes.len() / 2]).unwrap();

        assert!(matches!(store.load(), Err(StoreError::Decode(_))));
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_save_into_unwritable_location_fails() {
        let dir = TempDir::new().unwrap();
        // A regular file where a directory is expected.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let store = Store::open(blocker.join("data.dat"));
        assert!(matches!(store.save(&UserList::new()), Err(StoreError::Io { .. })));
    }
}
