//! Integration tests for config

#[cfg(test)]
mod tests {
    use irrpkg_config::*;
    use irrpkg_types::{BuildType, ColorChoice, CompilerName, Os};
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for var in [
            "IRRPKG_CACHE",
            "IRRPKG_JOBS",
            "IRRPKG_CMAKE",
            "IRRPKG_BUILD_TYPE",
        ] {
            std::env::remove_var(var);
        }
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
color = "never"

[build]
build_jobs = 4
cmake_program = "/usr/local/bin/cmake"
exports = false

[paths]
cache_path = "/tmp/irrpkg-cache"

[settings]
os = "Windows"
build_type = "Debug"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.color, ColorChoice::Never);
        assert_eq!(config.build.build_jobs, 4);
        assert_eq!(config.build.cmake_program, "/usr/local/bin/cmake");
        assert!(!config.build.exports);
        assert_eq!(
            config.cache_path(),
            std::path::PathBuf::from("/tmp/irrpkg-cache")
        );

        let settings = config.settings.to_settings().unwrap();
        assert_eq!(settings.os, Os::Windows);
        assert_eq!(settings.compiler.name, CompilerName::Msvc);
        assert_eq!(settings.build_type, BuildType::Debug);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_file(&dir.path().join("nope.toml"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.build.cmake_program, "cmake");
        assert!(config.build.exports);
        assert!(config.build_path().is_none());
        assert!(calculate_build_jobs(config.build.build_jobs) >= 1);
        assert_eq!(calculate_build_jobs(3), 3);
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("IRRPKG_CACHE", "/var/cache/irrpkg");
        std::env::set_var("IRRPKG_JOBS", "6");
        std::env::set_var("IRRPKG_BUILD_TYPE", "RelWithDebInfo");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(
            config.cache_path(),
            std::path::PathBuf::from("/var/cache/irrpkg")
        );
        assert_eq!(config.build.build_jobs, 6);
        assert_eq!(config.settings.build_type.as_deref(), Some("RelWithDebInfo"));

        clear_env();
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("IRRPKG_JOBS", "many");

        let mut config = Config::default();
        assert!(config.merge_env().is_err());

        clear_env();
    }

    #[test]
    fn test_invalid_setting_in_profile() {
        let config = Config {
            settings: SettingsConfig {
                arch: Some("sparc".to_string()),
                ..SettingsConfig::default()
            },
            ..Config::default()
        };
        assert!(config.settings.to_settings().is_err());
    }
}
