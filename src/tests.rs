#[cfg(test)]
mod integration_tests {
    use crate::cli::commands::{bookings, clients, profile, revenue, schedule};
    use crate::cli::{BookingsCommand, ProfileCommand, ScheduleCommand};
    use crate::config::StoreConfig;
    use crate::notes::FileNoteStore;
    use crate::store::RestTableStore;
    use compute::BookingAction;
    use model::{MemoryTableStore, NoteStore, Query, Table, TableStore};
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(url: &str, access_token: Option<&str>) -> StoreConfig {
        StoreConfig {
            url: url.to_string(),
            api_key: "anon-key".to_string(),
            access_token: access_token.map(str::to_string),
            notes_path: PathBuf::from("notes.json"),
        }
    }

    fn store() -> MemoryTableStore {
        MemoryTableStore::new()
            .with_rows(
                Table::Users,
                vec![
                    json!({"id": "u-counselor", "email": "sato@example.com", "name": "Sato"}),
                    json!({"id": "u1", "email": "aki@example.com", "name": "Aki"}),
                ],
            )
            .with_rows(
                Table::Counselors,
                vec![json!({
                    "id": "c1",
                    "user_id": "u-counselor",
                    "bio": "Licensed counselor",
                    "specialties": ["anxiety"],
                    "hourly_rate": 11000
                })],
            )
            .with_rows(
                Table::Bookings,
                vec![
                    json!({"id": "b1", "user_id": "u1", "counselor_id": "c1", "scheduled_at": "2024-01-08T12:00:00Z",
                           "service_type": "single", "amount": 5000, "status": "pending"}),
                    json!({"id": "b2", "user_id": "u1", "counselor_id": "c1", "scheduled_at": "2024-02-08T12:00:00Z",
                           "service_type": "monthly", "amount": 7000, "status": "completed"}),
                ],
            )
            .with_rows(
                Table::Payments,
                vec![
                    json!({"id": "p1", "booking_id": "b1", "amount": 5000, "status": "completed", "created_at": "2024-01-10T12:00:00Z"}),
                    json!({"id": "p2", "booking_id": "b1", "amount": 3000, "status": "completed", "created_at": "2024-01-20T12:00:00Z"}),
                    json!({"id": "p3", "booking_id": "b2", "amount": 7000, "status": "completed", "created_at": "2024-02-10T12:00:00Z"}),
                ],
            )
    }

    #[test]
    fn test_config_urls_and_token() {
        let cfg = config("https://db.example.com/", None);
        assert_eq!(cfg.table_url("bookings"), "https://db.example.com/rest/v1/bookings");
        assert_eq!(cfg.bearer_token(), "anon-key");

        let cfg = config("https://db.example.com", Some("session-jwt"));
        assert_eq!(cfg.bearer_token(), "session-jwt");
    }

    #[test]
    fn test_rest_store_query_url() {
        let rest = RestTableStore::new(config("https://db.example.com", None));
        let query = Query::from(Table::Bookings)
            .embed("user", Table::Users, "user_id")
            .eq("counselor_id", "c1");

        assert_eq!(
            rest.url(query.table, &query.to_query_string()),
            "https://db.example.com/rest/v1/bookings?select=*,user:users(*)&counselor_id=eq.c1"
        );
        assert_eq!(rest.url(Table::Schedules, ""), "https://db.example.com/rest/v1/schedules");
    }

    #[test]
    fn test_file_note_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let notes = FileNoteStore::new(&path);

        // Missing file reads as empty
        assert!(notes.load().unwrap().is_empty());

        clients::set_note(&notes, "u1", "prefers evenings").unwrap();
        clients::set_note(&notes, "u2", "first visit").unwrap();

        let loaded = notes.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded["u1"], "prefers evenings");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_revenue_command() {
        let store = store();
        let output = revenue::run(&store, "u-counselor").await.unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("2024-01") && lines[1].contains("¥8,000"));
        assert!(lines[2].starts_with("2024-02") && lines[2].contains("¥7,000"));
        assert!(lines[3].starts_with("Total") && lines[3].contains("¥15,000"));
    }

    #[tokio::test]
    async fn test_revenue_command_surfaces_store_error() {
        let store = store();
        let counselor_missing = revenue::run(&store, "nobody").await.unwrap_err();
        assert!(counselor_missing.to_string().contains("nobody"));

        store.fail_with("network error");
        let err = revenue::run(&store, "u-counselor").await.unwrap_err();
        assert_eq!(err.to_string(), "network error");
    }

    #[tokio::test]
    async fn test_clients_command_with_notes() {
        let dir = TempDir::new().unwrap();
        let notes = FileNoteStore::new(dir.path().join("notes.json"));
        clients::set_note(&notes, "u1", "prefers evenings").unwrap();

        let store = store();
        let output = clients::list(&store, &notes, "u-counselor").await.unwrap();

        assert!(output.starts_with("Aki <aki@example.com> (2 sessions)"));
        assert!(output.contains("Note: prefers evenings"));
        // Newest session first, as fetched
        let monthly = output.find("Monthly course").unwrap();
        let single = output.find("Single session").unwrap();
        assert!(monthly < single);
    }

    #[tokio::test]
    async fn test_bookings_set_action() {
        let store = store();

        let err = bookings::run(
            &store,
            "u-counselor",
            BookingsCommand::Set {
                booking: "b1".to_string(),
                action: BookingAction::Complete,
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("pending"));
        assert_eq!(store.mutation_count(), 0);

        let output = bookings::run(
            &store,
            "u-counselor",
            BookingsCommand::Set {
                booking: "b1".to_string(),
                action: BookingAction::Cancel,
            },
        )
        .await
        .unwrap();
        assert_eq!(output, "Booking b1 is now Cancelled");

        let listing = bookings::run(&store, "u-counselor", BookingsCommand::List).await.unwrap();
        let b1 = listing.lines().find(|l| l.starts_with("b1")).unwrap();
        assert!(b1.ends_with("[]"));
    }

    #[tokio::test]
    async fn test_schedule_commands() {
        let store = store();

        let added = schedule::run(
            &store,
            "u-counselor",
            ScheduleCommand::Add {
                day: 2,
                start: "09:00".to_string(),
                end: "12:00".to_string(),
            },
        )
        .await
        .unwrap();
        assert!(added.starts_with("Slot added: "));
        assert!(added.contains("Tue 09:00-12:00  available"));

        let slot_id = store.rows(Table::Schedules)[0]["id"].as_str().unwrap().to_string();
        let toggled = schedule::run(&store, "u-counselor", ScheduleCommand::Toggle { slot: slot_id.clone() })
            .await
            .unwrap();
        assert!(toggled.ends_with("unavailable"));

        schedule::run(&store, "u-counselor", ScheduleCommand::Delete { slot: slot_id })
            .await
            .unwrap();
        let listing = schedule::run(&store, "u-counselor", ScheduleCommand::List).await.unwrap();
        assert_eq!(listing, "No slots");
    }

    #[tokio::test]
    async fn test_schedule_rejects_other_counselors_slots() {
        let store = store().with_rows(
            Table::Schedules,
            vec![json!({"id": "s-other", "counselor_id": "c2", "day_of_week": 1,
                        "start_time": "10:00:00", "end_time": "12:00:00", "is_available": true})],
        );

        let err = schedule::run(&store, "u-counselor", ScheduleCommand::Delete { slot: "s-other".to_string() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No slot s-other for this counselor");

        let err = schedule::run(&store, "u-counselor", ScheduleCommand::Toggle { slot: "s-other".to_string() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No slot s-other for this counselor");

        assert_eq!(store.rows(Table::Schedules).len(), 1);
        assert_eq!(store.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_profile_commands() {
        let store = store();

        let output = profile::run(
            &store,
            "u-counselor",
            ProfileCommand::AddSpecialty { tag: " anxiety ".to_string() },
        )
        .await
        .unwrap();
        assert_eq!(output, "Specialty 'anxiety' is already listed");
        assert_eq!(store.mutation_count(), 0);

        let output = profile::run(
            &store,
            "u-counselor",
            ProfileCommand::AddSpecialty { tag: "career".to_string() },
        )
        .await
        .unwrap();
        assert!(output.contains("Specialties: anxiety, career"));

        let output = profile::run(
            &store,
            "u-counselor",
            ProfileCommand::SetRate { rate: Decimal::from(12500) },
        )
        .await
        .unwrap();
        assert!(output.contains("Hourly rate: ¥12,500"));
        assert_eq!(store.mutation_count(), 2);

        let counselors = store
            .select(&Query::from(Table::Counselors).eq("id", "c1"))
            .await
            .unwrap();
        assert_eq!(counselors[0]["specialties"], json!(["anxiety", "career"]));
    }
}
