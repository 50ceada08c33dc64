//! End-to-end driver runs against a scripted build system

use super::*;
use irrpkg_builder::{Phase, RecipeDefinition, RecipeDriver, TOOLCHAIN_FILE};
use irrpkg_errors::{ConfigError, PackageError, VersionError};
use irrpkg_events::{AppEvent, GeneralEvent, RecipeEvent};
use irrpkg_types::{OptionName, Version, CMAKE_TARGET_NAME};
use tempfile::TempDir;

struct Sandbox {
    recipe: TempDir,
    cache: TempDir,
    work: TempDir,
}

impl Sandbox {
    fn new(cmakelists: &str) -> Self {
        let sandbox = Self {
            recipe: TempDir::new().unwrap(),
            cache: TempDir::new().unwrap(),
            work: TempDir::new().unwrap(),
        };
        engine_sources(sandbox.recipe.path(), cmakelists);
        sandbox
    }

    fn context(&self, os: &str) -> BuildContext {
        context(self.recipe.path(), self.cache.path(), self.work.path(), os)
    }
}

fn driver(context: BuildContext, build: &Arc<ScriptedBuild>) -> RecipeDriver {
    RecipeDriver::new(RecipeDefinition::irrlicht_engine(), context)
        .with_build_system(build.clone())
}

#[tokio::test]
async fn full_run_produces_consumable_package() {
    let sandbox = Sandbox::new(ENGINE_CMAKELISTS);
    let irrlicht = publish_irrlicht(sandbox.cache.path());
    let build = Arc::new(ScriptedBuild::default());

    let report = driver(sandbox.context("Linux"), &build).run().await.unwrap();

    assert_eq!(report.completed, Phase::ORDER);
    assert_eq!(report.version, Some(Version::new(3, 4, 5)));
    assert_eq!(build.calls(), ["configure", "build", "install"]);

    let package = report.package_folder.clone().unwrap();
    assert!(package.join("licenses/LICENSE.md").is_file());
    assert!(package.join("lib/libirrlicht-engine.a").is_file());
    assert!(!package.join("lib/cmake").exists());

    let info = read_package_info(&package);
    assert_eq!(info.version, Version::new(3, 4, 5));
    let engine = info.component("engine").unwrap();
    assert_eq!(engine.libs, ["irrlicht-engine"]);
    assert_eq!(
        engine.properties.get(CMAKE_TARGET_NAME).map(String::as_str),
        Some("irrlicht::engine")
    );
    assert_eq!(info.requires.len(), 1);
    assert!(info.requires[0].transitive_headers);
    assert!(info.requires[0].transitive_libs);

    let layout = report.layout.unwrap();
    assert_eq!(
        layout.build_folder,
        sandbox.work.path().join("build").join("Release")
    );
    assert_eq!(layout.source_folder, sandbox.work.path().join("export_source"));
    assert!(layout.source_folder.join("include/irrlicht-engine/engine.h").is_file());
    assert!(!layout.source_folder.join("test_package").exists());

    let toolchain =
        std::fs::read_to_string(layout.generators_folder.join(TOOLCHAIN_FILE)).unwrap();
    assert!(toolchain.contains("CMAKE_POSITION_INDEPENDENT_CODE ON"));
    assert!(toolchain.contains(&irrlicht.display().to_string().replace('\\', "/")));
    assert!(layout.generators_folder.join("irrlicht-config.cmake").is_file());

    let contexts = build.contexts.lock().unwrap();
    assert_eq!(
        contexts[0].toolchain_file.as_deref(),
        Some(layout.generators_folder.join(TOOLCHAIN_FILE).as_path())
    );
    assert_eq!(contexts[2].package_dir, package);
}

#[tokio::test]
async fn package_folder_is_keyed_by_package_id() {
    let sandbox = Sandbox::new(ENGINE_CMAKELISTS);
    publish_irrlicht(sandbox.cache.path());
    let build = Arc::new(ScriptedBuild::default());

    let report = driver(sandbox.context("Linux"), &build).run().await.unwrap();
    let id = report.package_id.unwrap();
    assert_eq!(
        report.package_folder.unwrap(),
        sandbox
            .cache
            .path()
            .join("irrlicht-engine/3.4.5/_/_/package")
            .join(id)
    );
}

#[tokio::test]
async fn zero_padded_version_is_packaged_verbatim() {
    let sandbox = Sandbox::new("project(irrlicht-engine VERSION 2019.07.0 LANGUAGES CXX)\n");
    publish_irrlicht(sandbox.cache.path());
    let build = Arc::new(ScriptedBuild::default());

    let report = driver(sandbox.context("Linux"), &build).run().await.unwrap();
    assert_eq!(report.version.as_ref().map(Version::as_str), Some("2019.07.0"));

    let package = report.package_folder.unwrap();
    assert!(package.starts_with(sandbox.cache.path().join("irrlicht-engine/2019.07.0")));
    assert_eq!(read_package_info(&package).version.as_str(), "2019.07.0");
}

#[tokio::test]
async fn malformed_version_aborts_before_building() {
    let sandbox = Sandbox::new("project(irrlicht-engine VERSION abc)\n");
    publish_irrlicht(sandbox.cache.path());
    let build = Arc::new(ScriptedBuild::default());

    let mut driver = driver(sandbox.context("Linux"), &build);
    let err = driver.run().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Version(VersionError::MalformedProjectVersion { ref found, .. }) if found == "abc"
    ));
    assert!(build.calls().is_empty());
    assert!(driver.report().completed.is_empty());
}

#[tokio::test]
async fn missing_version_is_its_own_error() {
    let sandbox = Sandbox::new("project(irrlicht-engine LANGUAGES CXX)\n");
    let build = Arc::new(ScriptedBuild::default());

    let err = driver(sandbox.context("Linux"), &build)
        .run()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Version(VersionError::MissingProjectVersion { .. })
    ));
}

#[tokio::test]
async fn windows_has_no_fpic_and_one_build_folder() {
    let sandbox = Sandbox::new(ENGINE_CMAKELISTS);
    publish_irrlicht(sandbox.cache.path());
    let build = Arc::new(ScriptedBuild::default());

    let report = driver(sandbox.context("Windows"), &build).run().await.unwrap();

    let options = report.options.unwrap();
    assert!(!options.contains(OptionName::Fpic));
    assert!(!report
        .available_options
        .unwrap()
        .contains(&OptionName::Fpic));
    assert_eq!(
        report.layout.unwrap().build_folder,
        sandbox.work.path().join("build")
    );

    let contexts = build.contexts.lock().unwrap();
    assert!(contexts[0].multi_config);
}

#[tokio::test]
async fn fpic_override_is_rejected_on_windows() {
    let sandbox = Sandbox::new(ENGINE_CMAKELISTS);
    let build = Arc::new(ScriptedBuild::default());

    let context = sandbox.context("Windows").with_option("fPIC", "True");
    let err = driver(context, &build).run().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::UnknownOption { ref option, .. }) if option == "fPIC"
    ));
}

#[tokio::test]
async fn shared_override_reaches_the_toolchain() {
    let sandbox = Sandbox::new(ENGINE_CMAKELISTS);
    publish_irrlicht(sandbox.cache.path());
    let build = Arc::new(ScriptedBuild::default());

    let context = sandbox.context("Linux").with_option("shared", "True");
    let report = driver(context, &build).run().await.unwrap();

    assert!(report.options.unwrap().shared());
    let toolchain = std::fs::read_to_string(
        report.layout.unwrap().generators_folder.join(TOOLCHAIN_FILE),
    )
    .unwrap();
    assert!(toolchain.contains("set(BUILD_SHARED_LIBS ON"));
}

#[tokio::test]
async fn missing_dependency_stops_the_run() {
    let sandbox = Sandbox::new(ENGINE_CMAKELISTS);
    let build = Arc::new(ScriptedBuild::default());

    let mut driver = driver(sandbox.context("Linux"), &build);
    let err = driver.run().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Package(PackageError::DependencyNotFound { .. })
    ));
    assert_eq!(
        driver.report().completed,
        [Phase::SetVersion, Phase::ConfigOptions]
    );
    assert!(build.calls().is_empty());
}

#[tokio::test]
async fn configure_failure_keeps_tool_output_and_skips_packaging() {
    let sandbox = Sandbox::new(ENGINE_CMAKELISTS);
    publish_irrlicht(sandbox.cache.path());
    let build = Arc::new(ScriptedBuild {
        fail_configure: Some("CMake Error at CMakeLists.txt:6 (find_package)".to_string()),
        ..ScriptedBuild::default()
    });

    let mut driver = driver(sandbox.context("Linux"), &build);
    let err = driver.run().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Build(BuildError::ConfigureFailed { ref message })
            if message == "CMake Error at CMakeLists.txt:6 (find_package)"
    ));
    assert_eq!(build.calls(), ["configure"]);
    let report = driver.report();
    assert!(!report.package_folder.unwrap().exists());
    assert!(report.package_info.is_none());
}

#[tokio::test]
async fn phases_refuse_to_run_without_inputs() {
    let sandbox = Sandbox::new(ENGINE_CMAKELISTS);
    let build = Arc::new(ScriptedBuild::default());

    let err = driver(sandbox.context("Linux"), &build)
        .run_phases(&[Phase::Build])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Build(BuildError::PhaseOutOfOrder { ref phase, ref requires })
            if phase == "build" && requires == "layout"
    ));
}

#[tokio::test]
async fn metadata_only_run_writes_nothing() {
    let sandbox = Sandbox::new(ENGINE_CMAKELISTS);
    let build = Arc::new(ScriptedBuild::default());

    let report = driver(sandbox.context("Linux"), &build)
        .declare_only()
        .run_phases(&Phase::METADATA)
        .await
        .unwrap();

    assert_eq!(report.completed, Phase::METADATA);
    assert_eq!(report.requirements.len(), 1);
    assert!(report.package_folder.is_none());
    assert_eq!(report.package_info.unwrap().name, "irrlicht-engine");
    assert!(build.calls().is_empty());
    assert_eq!(std::fs::read_dir(sandbox.work.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn events_trace_phases_and_flag_testing_channel() {
    let sandbox = Sandbox::new(ENGINE_CMAKELISTS);
    publish_irrlicht(sandbox.cache.path());
    let build = Arc::new(ScriptedBuild::default());
    let (tx, mut rx) = irrpkg_events::channel();

    let context = sandbox.context("Linux").with_event_sender(tx);
    driver(context, &build).run().await.unwrap();

    let mut completed = Vec::new();
    let mut testing_declared = false;
    let mut warned = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            AppEvent::Recipe(RecipeEvent::PhaseCompleted { phase, .. }) => completed.push(phase),
            AppEvent::Recipe(RecipeEvent::RequirementDeclared {
                testing_channel, ..
            }) => testing_declared = testing_channel,
            AppEvent::General(GeneralEvent::Warning { message, .. }) => {
                warned |= message.contains("irrlicht/1.8.4@mpusz/testing");
            }
            _ => {}
        }
    }

    let expected: Vec<String> = Phase::ORDER.iter().map(ToString::to_string).collect();
    assert_eq!(completed, expected);
    assert!(testing_declared);
    assert!(warned);
}
