//! Unit tests for users: album CRUD, photo sharing, tagging and queries

#[cfg(test)]
mod tests {
    use crate::model::error::{Entity, ModelError};
    use crate::model::photo::Photo;
    use crate::model::tag::Tag;
    use crate::model::user::User;
    use crate::testing::{at, sample_user};
    use std::collections::BTreeSet;

    fn paths(photos: &[&Photo]) -> Vec<String> {
        photos.iter().map(|p| p.path().to_string()).collect()
    }

    fn path_set(photos: &[&Photo]) -> BTreeSet<String> {
        photos.iter().map(|p| p.path().to_string()).collect()
    }

    #[test]
    fn test_new_user_has_default_tag_types() {
        let user = User::new("alice");
        assert_eq!(user.username(), "alice");
        let location = user.tag_type("Location").unwrap();
        assert!(!location.allows_multiple_values());
        let people = user.tag_type("people").unwrap();
        assert!(people.allows_multiple_values());
        assert!(user.album_names().is_empty());
    }

    #[test]
    fn test_add_album_twice_fails() {
        let mut user = User::new("alice");
        user.add_album("trip").unwrap();
        let result = user.add_album("trip");
        assert!(matches!(
            result,
            Err(ModelError::AlreadyExists { entity: Entity::Album, .. })
        ));
        assert_eq!(user.album_names(), ["trip"]);
    }

    #[test]
    fn test_add_blank_album_fails() {
        let mut user = User::new("alice");
        assert!(matches!(user.add_album("  "), Err(ModelError::InvalidOperation(_))));
    }

    #[test]
    fn test_rename_album() {
        let mut user = User::new("alice");
        user.add_album("trip").unwrap();
        user.import_photo("trip", Photo::new("a.jpg", at(2024, 1, 1))).unwrap();

        user.rename_album("trip", "paris").unwrap();
        assert!(!user.has_album("trip"));
        let album = user.album("paris").unwrap();
        assert_eq!(album.name(), "paris");
        assert_eq!(album.photo_paths(), ["a.jpg"]);
    }

    #[test]
    fn test_rename_album_failures() {
        let mut user = User::new("alice");
        user.add_album("trip").unwrap();
        user.add_album("home").unwrap();

        assert!(matches!(
            user.rename_album("trip", "trip"),
            Err(ModelError::AlreadyExists { .. })
        ));
        assert!(matches!(
            user.rename_album("trip", "home"),
            Err(ModelError::AlreadyExists { .. })
        ));
        assert!(matches!(
            user.rename_album("missing", "new"),
            Err(ModelError::NotFound { .. })
        ));
        assert!(user.has_album("trip"));
    }

    #[test]
    fn test_delete_missing_album_fails() {
        let mut user = User::new("alice");
        assert!(matches!(
            user.delete_album("nope"),
            Err(ModelError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_non_empty_album_cascades() {
        let mut user = User::new("alice");
        user.add_album("trip").unwrap();
        user.add_album("best").unwrap();
        user.import_photo("trip", Photo::new("only_trip.jpg", at(2024, 1, 1))).unwrap();
        user.import_photo("trip", Photo::new("shared.jpg", at(2024, 1, 2))).unwrap();
        user.copy_photo("shared.jpg", "trip", "best").unwrap();

        let deleted = user.delete_album("trip").unwrap();
        assert_eq!(deleted.len(), 2);
        assert!(!user.has_album("trip"));
        assert!(user.photo("only_trip.jpg").is_none());
        assert!(user.photo("shared.jpg").is_some());
    }

    #[test]
    fn test_photo_is_shared_between_albums() {
        let mut user = User::new("alice");
        user.add_album("trip").unwrap();
        user.add_album("best").unwrap();
        user.import_photo("trip", Photo::new("a.jpg", at(2024, 1, 1))).unwrap();
        user.copy_photo("a.jpg", "trip", "best").unwrap();

        user.set_caption("a.jpg", "sunset").unwrap();
        for album in ["trip", "best"] {
            let album = user.album(album).unwrap();
            let photo = album.photos(user.library()).next().unwrap();
            assert_eq!(photo.caption(), "sunset");
        }
        assert_eq!(user.library().len(), 1);
    }

    #[test]
    fn test_import_known_path_reuses_library_entry() {
        let mut user = User::new("alice");
        user.add_album("trip").unwrap();
        user.add_album("best").unwrap();
        user.import_photo("trip", Photo::new("a.jpg", at(2024, 1, 1))).unwrap();
        user.set_caption("a.jpg", "kept").unwrap();

        let stored = user.import_photo("best", Photo::new("a.jpg", at(1990, 1, 1))).unwrap();
        assert_eq!(stored.caption(), "kept");
        assert_eq!(stored.date_taken(), at(2024, 1, 1));
    }

    #[test]
    fn test_import_into_missing_album_fails() {
        let mut user = User::new("alice");
        let result = user.import_photo("nope", Photo::new("a.jpg", at(2024, 1, 1)));
        assert!(matches!(result, Err(ModelError::NotFound { .. })));
        assert!(user.library().is_empty());
    }

    #[test]
    fn test_remove_photo_releases_orphans() {
        let mut user = User::new("alice");
        user.add_album("trip").unwrap();
        user.import_photo("trip", Photo::new("a.jpg", at(2024, 1, 1))).unwrap();

        assert!(user.remove_photo("trip", "a.jpg").unwrap());
        assert!(!user.remove_photo("trip", "a.jpg").unwrap());
        assert!(user.photo("a.jpg").is_none());
    }

    #[test]
    fn test_move_photo() {
        let mut user = User::new("alice");
        user.add_album("inbox").unwrap();
        user.add_album("trip").unwrap();
        user.import_photo("inbox", Photo::new("a.jpg", at(2024, 1, 1))).unwrap();

        user.move_photo("a.jpg", "inbox", "trip").unwrap();
        assert!(user.album("inbox").unwrap().is_empty());
        assert!(user.album("trip").unwrap().contains("a.jpg"));
        assert!(user.photo("a.jpg").is_some());
    }

    #[test]
    fn test_move_out_of_stock_album_leaves_state_untouched() {
        let mut user = User::new("alice");
        user.seed_album("stock", vec![Photo::new("s.jpg", at(2024, 1, 1))]).unwrap();
        user.add_album("mine").unwrap();

        let result = user.move_photo("s.jpg", "stock", "mine");
        assert!(matches!(result, Err(ModelError::InvalidOperation(_))));
        assert!(user.album("stock").unwrap().contains("s.jpg"));
        assert!(user.album("mine").unwrap().is_empty());
    }

    #[test]
    fn test_copy_requires_photo_in_source() {
        let mut user = User::new("alice");
        user.add_album("a").unwrap();
        user.add_album("b").unwrap();
        assert!(matches!(
            user.copy_photo("x.jpg", "a", "b"),
            Err(ModelError::NotFound { entity: Entity::Photo, .. })
        ));
    }

    #[test]
    fn test_tag_photo_multiplicity_at_boundary() {
        let mut user = User::new("alice");
        user.add_album("trip").unwrap();
        user.import_photo("trip", Photo::new("a.jpg", at(2024, 1, 1))).unwrap();

        user.tag_photo("a.jpg", "location", "Paris").unwrap();
        assert!(matches!(
            user.tag_photo("a.jpg", "location", "nyc"),
            Err(ModelError::InvalidOperation(_))
        ));

        user.tag_photo("a.jpg", "people", "alice").unwrap();
        user.tag_photo("a.jpg", "people", "bob").unwrap();
        assert!(matches!(
            user.tag_photo("a.jpg", "people", "Bob"),
            Err(ModelError::DuplicateTag(_))
        ));
        assert!(matches!(
            user.tag_photo("a.jpg", "mood", "happy"),
            Err(ModelError::NotFound { entity: Entity::TagType, .. })
        ));
        assert_eq!(user.photo("a.jpg").unwrap().tags().len(), 3);
    }

    #[test]
    fn test_untag_is_idempotent() {
        let mut user = User::new("alice");
        user.add_album("trip").unwrap();
        user.import_photo("trip", Photo::new("a.jpg", at(2024, 1, 1))).unwrap();
        let tag = user.tag_photo("a.jpg", "location", "paris").unwrap();

        assert!(user.untag_photo("a.jpg", &tag).unwrap());
        assert!(!user.untag_photo("a.jpg", &tag).unwrap());
    }

    #[test]
    fn test_tag_type_registry() {
        let mut user = User::new("alice");
        assert!(user.add_tag_type("Mood", false));
        assert!(!user.add_tag_type("mood", true));
        assert!(!user.add_tag_type("  ", true));
        assert_eq!(user.tag_type("MOOD").unwrap().name(), "mood");

        assert!(user.remove_tag_type("mood"));
        assert!(!user.remove_tag_type("mood"));
        assert!(user.tag_type("mood").is_none());
    }

    #[test]
    fn test_remove_tag_type_then_sweep() {
        let mut user = sample_user();
        assert!(user.remove_tag_type("people"));
        // Tags stay until the sweep runs.
        assert!(user.library().iter().any(|p| p.has_tag_type("people")));

        let stripped = user.strip_tags_of_type("people");
        assert_eq!(stripped, 3);
        assert!(!user.library().iter().any(|p| p.has_tag_type("people")));
    }

    #[test]
    fn test_single_tag_query_spans_albums() {
        let user = sample_user();
        let paris = user.tag("location", "paris").unwrap();
        let found = user.photos_with_single_tag(&paris);
        assert_eq!(paths(&found), ["eiffel.jpg", "louvre.jpg"]);
    }

    #[test]
    fn test_shared_photo_reported_once() {
        let user = sample_user();
        let alice = user.tag("people", "alice").unwrap();
        let found = user.photos_with_single_tag(&alice);
        // louvre.jpg sits in two albums.
        assert_eq!(paths(&found), ["eiffel.jpg", "louvre.jpg"]);
    }

    #[test]
    fn test_both_and_either_are_intersection_and_union() {
        let user = sample_user();
        let pairs = [
            (user.tag("location", "paris").unwrap(), user.tag("people", "bob").unwrap()),
            (user.tag("people", "alice").unwrap(), user.tag("people", "bob").unwrap()),
            (user.tag("location", "rome").unwrap(), user.tag("location", "nowhere").unwrap()),
        ];
        for (first, second) in &pairs {
            let left = path_set(&user.photos_with_single_tag(first));
            let right = path_set(&user.photos_with_single_tag(second));

            let both = path_set(&user.photos_with_both_tags(first, second));
            let either = path_set(&user.photos_with_either_tag(first, second));

            assert_eq!(both, left.intersection(&right).cloned().collect::<BTreeSet<_>>());
            assert_eq!(either, left.union(&right).cloned().collect::<BTreeSet<_>>());
        }
    }

    #[test]
    fn test_all_and_any_over_tag_lists() {
        let user = sample_user();
        let paris = user.tag("location", "paris").unwrap();
        let alice = user.tag("people", "alice").unwrap();
        let bob = user.tag("people", "bob").unwrap();

        let all = user.photos_with_all_tags(&[paris.clone(), alice.clone()]);
        assert_eq!(paths(&all), ["eiffel.jpg", "louvre.jpg"]);
        assert!(user.photos_with_all_tags(&[paris.clone(), bob.clone()]).is_empty());

        let any = user.photos_with_any_tag(&[paris, bob]);
        assert_eq!(paths(&any), ["colosseum.jpg", "eiffel.jpg", "louvre.jpg"]);
        assert!(user.photos_with_any_tag(&[]).is_empty());
    }

    #[test]
    fn test_date_range_query_across_albums() {
        let user = sample_user();
        let found = user.photos_in_date_range(at(2024, 5, 1), at(2024, 7, 1));
        assert_eq!(paths(&found), ["eiffel.jpg", "louvre.jpg"]);

        // Boundaries are exclusive.
        let found = user.photos_in_date_range(at(2024, 5, 10), at(2024, 6, 2));
        assert_eq!(paths(&found), ["louvre.jpg"]);
    }

    #[test]
    fn test_albums_containing_photo() {
        let user = sample_user();
        let names: Vec<&str> = user
            .albums_containing_photo("louvre.jpg")
            .iter()
            .map(|a| a.name())
            .collect();
        assert_eq!(names, ["favorites", "paris"]);
        assert!(user.albums_containing_photo("unknown.jpg").is_empty());
    }

    #[test]
    fn test_create_album_from_results() {
        let mut user = sample_user();
        let paris = user.tag("location", "paris").unwrap();
        let results: Vec<String> = user
            .photos_with_single_tag(&paris)
            .iter()
            .map(|p| p.path().to_string())
            .collect();

        let album = user.create_album_from("paris again", &results).unwrap();
        assert_eq!(album.len(), 2);
        assert!(matches!(
            user.create_album_from("paris again", &results),
            Err(ModelError::AlreadyExists { .. })
        ));
        assert!(matches!(
            user.create_album_from("ghosts", &["ghost.jpg"]),
            Err(ModelError::NotFound { .. })
        ));
        assert!(!user.has_album("ghosts"));
    }

    #[test]
    fn test_create_album_from_into_stock_leaves_no_album() {
        let mut user = sample_user();
        let result = user.create_album_from("Stock", &["louvre.jpg"]);
        assert!(matches!(result, Err(ModelError::InvalidOperation(_))));
        assert!(!user.has_album("Stock"));
        assert_eq!(user.album_names(), ["favorites", "paris", "rome"]);
    }

    #[test]
    fn test_non_ascii_tag_type_names_are_unique() {
        let mut user = User::new("alice");
        assert!(user.add_tag_type("Été", false));
        assert!(!user.add_tag_type("ÉTÉ", false));
        assert_eq!(user.tag_types().iter().filter(|t| t.name() == "été").count(), 1);
        assert!(user.tag_type("ÉTÉ").is_some());

        user.add_album("trip").unwrap();
        user.import_photo("trip", Photo::new("a.jpg", at(2024, 7, 1))).unwrap();
        user.tag_photo("a.jpg", "été", "plage").unwrap();
        assert!(matches!(
            user.tag_photo("a.jpg", "ÉTÉ", "montagne"),
            Err(ModelError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_seed_album_bypasses_guard_and_skips_duplicates() {
        let mut user = User::new("stock");
        let added = user
            .seed_album(
                "stock",
                vec![
                    Photo::new("s1.jpg", at(2024, 1, 1)),
                    Photo::new("s2.jpg", at(2024, 1, 2)),
                    Photo::new("s1.jpg", at(2024, 1, 1)),
                ],
            )
            .unwrap();
        assert_eq!(added, 2);
        let album = user.album("stock").unwrap();
        assert_eq!(album.photo_paths(), ["s1.jpg", "s2.jpg"]);

        assert!(matches!(
            user.import_photo("stock", Photo::new("s3.jpg", at(2024, 1, 3))),
            Err(ModelError::InvalidOperation(_))
        ));
        assert!(matches!(
            user.remove_photo("stock", "s1.jpg"),
            Err(ModelError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_tag_builds_from_user_types() {
        let user = User::new("alice");
        let tag = user.tag("LOCATION", "Paris").unwrap();
        assert_eq!(tag, Tag::new(user.tag_type("location").unwrap(), "paris"));
        assert!(user.tag("mood", "x").is_err());
    }
}
