#[cfg(test)]
mod tests {
    use taskman::libs::config::{Config, CONFIG_FILE_NAME, DEFAULT_COLLECTION_NAME, DEFAULT_DATABASE_NAME, DEFAULT_STORE_URI};
    use taskman::libs::data_storage::DataStorage;
    use taskman::libs::task::{Priority, Status};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Gives each test its own data directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        storage: DataStorage,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let storage = DataStorage::at(temp_dir.path().join("taskman"));
            ConfigTestContext {
                _temp_dir: temp_dir,
                storage,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_config(_ctx: &mut ConfigTestContext) {
        let config = Config::default();
        assert_eq!(config.store_uri, DEFAULT_STORE_URI);
        assert_eq!(config.database_name, DEFAULT_DATABASE_NAME);
        assert_eq!(config.collection_name, DEFAULT_COLLECTION_NAME);
        assert_eq!(config.priority_levels, Priority::ALL.to_vec());
        assert_eq!(config.status_options, Status::ALL.to_vec());
        assert_eq!(config.status_names(), "Pending, In Progress, Completed");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.storage).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            store_uri: "sqlite::memory:".to_string(),
            database_name: "work".to_string(),
            priority_levels: vec![Priority::High, Priority::Low],
            ..Config::default()
        };
        config.save_to(&ctx.storage).unwrap();

        assert!(ctx.storage.base_path().join(CONFIG_FILE_NAME).exists());
        assert_eq!(Config::read_from(&ctx.storage).unwrap(), config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_config_file(ctx: &mut ConfigTestContext) {
        let path = ctx.storage.get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, r#"{ "collection_name": "chores", "status_options": ["Pending", "Completed"] }"#).unwrap();

        let config = Config::read_from(&ctx.storage).unwrap();
        assert_eq!(config.collection_name, "chores");
        assert_eq!(config.database_name, DEFAULT_DATABASE_NAME);
        assert!(config.accepts_status(Status::Completed));
        assert!(!config.accepts_status(Status::InProgress));
        assert!(config.accepts_priority(Priority::Medium));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_invalid_config_file(ctx: &mut ConfigTestContext) {
        let path = ctx.storage.get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, r#"{ "priority_levels": ["Urgent"] }"#).unwrap();

        assert!(Config::read_from(&ctx.storage).is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_env_overrides(_ctx: &mut ConfigTestContext) {
        std::env::set_var("TASKMAN_STORE_URI", "sqlite::memory:");
        std::env::set_var("TASKMAN_DATABASE", "scratch");
        std::env::set_var("TASKMAN_COLLECTION", "inbox");

        let config = Config::default().with_env_overrides();

        std::env::remove_var("TASKMAN_STORE_URI");
        std::env::remove_var("TASKMAN_DATABASE");
        std::env::remove_var("TASKMAN_COLLECTION");

        assert_eq!(config.store_uri, "sqlite::memory:");
        assert_eq!(config.database_name, "scratch");
        assert_eq!(config.collection_name, "inbox");
    }
}
