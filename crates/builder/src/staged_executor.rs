//! Phase driver for recipe evaluation
//!
//! Phases run strictly one after another. Each phase records what it
//! produced in the driver state; a phase whose inputs are missing fails with
//! `BuildError::PhaseOutOfOrder` instead of guessing. The first error aborts
//! the run and no later phase executes.

use crate::build_systems::{BuildSystem, BuildSystemContext, CMakeBuildSystem};
use crate::dependencies::{reference_folder, DependencyResolver, ResolvedDependency};
use crate::environment::BuildEnvironment;
use crate::exports::export_sources;
use crate::generators::{generate_dependency_configs, generate_toolchain};
use crate::layout::{cmake_layout, Layout};
use crate::package_id::compute_package_id;
use crate::packaging::{copy_license, prune_directory, write_package_info};
use crate::recipe::phases::Phase;
use crate::recipe::version::read_project_version;
use crate::recipe::RecipeDefinition;
use crate::BuildContext;
use irrpkg_errors::{BuildError, Error};
use irrpkg_events::{
    AppEvent, BuildEvent, EventEmitter, EventSender, FailureContext, RecipeEvent,
};
use irrpkg_types::{OptionName, OptionValues, PackageInfo, PackageRef, Requirement, Version};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::fs;

/// What a run produced, phase by phase
#[derive(Clone, Debug, Default, Serialize)]
pub struct RecipeReport {
    pub name: String,
    pub completed: Vec<Phase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_options: Option<BTreeSet<OptionName>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionValues>,
    pub requirements: Vec<Requirement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_folder: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_info: Option<PackageInfo>,
}

#[derive(Default)]
struct DriverState {
    version: Option<Version>,
    available_options: Option<BTreeSet<OptionName>>,
    options: Option<OptionValues>,
    requirements: Option<Vec<Requirement>>,
    dependencies: Option<Vec<ResolvedDependency>>,
    package_id: Option<String>,
    layout: Option<Layout>,
    package_folder: Option<PathBuf>,
    built: bool,
    packaged: bool,
    package_info: Option<PackageInfo>,
    completed: Vec<Phase>,
}

/// Drives one recipe through its phases
pub struct RecipeDriver {
    recipe: RecipeDefinition,
    context: BuildContext,
    build_system: Arc<dyn BuildSystem>,
    resolve_dependencies: bool,
    state: DriverState,
}

impl EventEmitter for RecipeDriver {
    fn event_sender(&self) -> Option<&EventSender> {
        self.context.event_sender.as_ref()
    }
}

fn out_of_order(phase: Phase, requires: Phase) -> Error {
    BuildError::PhaseOutOfOrder {
        phase: phase.to_string(),
        requires: requires.to_string(),
    }
    .into()
}

impl RecipeDriver {
    /// Create a driver building with CMake
    #[must_use]
    pub fn new(recipe: RecipeDefinition, context: BuildContext) -> Self {
        let cmake = CMakeBuildSystem::with_program(context.cmake_program.clone());
        Self {
            recipe,
            context,
            build_system: Arc::new(cmake),
            resolve_dependencies: true,
            state: DriverState::default(),
        }
    }

    /// Replace the build system
    #[must_use]
    pub fn with_build_system(mut self, build_system: Arc<dyn BuildSystem>) -> Self {
        self.build_system = build_system;
        self
    }

    /// Only declare requirements instead of locating them in the cache
    ///
    /// Useful for inspecting a recipe whose dependencies are not built yet.
    /// Phases that need located dependencies fail as out of order.
    #[must_use]
    pub fn declare_only(mut self) -> Self {
        self.resolve_dependencies = false;
        self
    }

    #[must_use]
    pub fn recipe(&self) -> &RecipeDefinition {
        &self.recipe
    }

    /// Run every phase in order
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing phase.
    pub async fn run(&mut self) -> Result<RecipeReport, Error> {
        self.run_phases(&Phase::ORDER).await
    }

    /// Run the given phases in the given order
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing phase; later phases are not
    /// executed.
    pub async fn run_phases(&mut self, phases: &[Phase]) -> Result<RecipeReport, Error> {
        let recipe = self.recipe.name().to_string();
        self.emit_operation_started(format!("Evaluating recipe {recipe}"));

        for &phase in phases {
            self.emit(AppEvent::Recipe(RecipeEvent::PhaseStarted {
                recipe: recipe.clone(),
                phase: phase.to_string(),
            }));
            let started = Instant::now();

            if let Err(err) = self.run_phase(phase).await {
                self.emit(AppEvent::Recipe(RecipeEvent::PhaseFailed {
                    recipe: recipe.clone(),
                    phase: phase.to_string(),
                    failure: FailureContext::from_error(&err),
                }));
                self.emit_operation_completed(format!("Evaluating recipe {recipe}"), false);
                return Err(err);
            }

            self.state.completed.push(phase);
            self.emit(AppEvent::Recipe(RecipeEvent::PhaseCompleted {
                recipe: recipe.clone(),
                phase: phase.to_string(),
                duration: started.elapsed(),
            }));
        }

        self.emit_operation_completed(format!("Evaluating recipe {recipe}"), true);
        Ok(self.report())
    }

    /// Snapshot of everything produced so far
    #[must_use]
    pub fn report(&self) -> RecipeReport {
        RecipeReport {
            name: self.recipe.name().to_string(),
            completed: self.state.completed.clone(),
            version: self.state.version.clone(),
            available_options: self.state.available_options.clone(),
            options: self.state.options.clone(),
            requirements: self.state.requirements.clone().unwrap_or_default(),
            package_id: self.state.package_id.clone(),
            layout: self.state.layout.clone(),
            package_folder: self.state.package_folder.clone(),
            package_info: self.state.package_info.clone(),
        }
    }

    async fn run_phase(&mut self, phase: Phase) -> Result<(), Error> {
        match phase {
            Phase::SetVersion => self.set_version().await,
            Phase::ConfigOptions => self.config_options(),
            Phase::Requirements => self.requirements().await,
            Phase::Layout => self.layout().await,
            Phase::Build => self.build().await,
            Phase::Package => self.package().await,
            Phase::PackageInfo => self.package_info().await,
        }
    }

    async fn set_version(&mut self) -> Result<(), Error> {
        let version =
            read_project_version(&self.context.recipe_folder, &self.recipe.version_file).await?;

        self.emit(AppEvent::Recipe(RecipeEvent::VersionResolved {
            recipe: self.recipe.name().to_string(),
            version: version.clone(),
            source: self.recipe.version_file.clone(),
        }));
        self.state.version = Some(version);
        Ok(())
    }

    fn config_options(&mut self) -> Result<(), Error> {
        let os = self.context.settings.os;
        let available = self.recipe.config_options(os);
        let options = self
            .recipe
            .resolve_options(os, &self.context.option_overrides)?;

        self.emit(AppEvent::Recipe(RecipeEvent::OptionsResolved {
            recipe: self.recipe.name().to_string(),
            options: options.clone(),
        }));
        self.state.available_options = Some(available);
        self.state.options = Some(options);
        Ok(())
    }

    async fn requirements(&mut self) -> Result<(), Error> {
        let requirements = self.recipe.requirements().to_vec();

        for requirement in &requirements {
            let reference = &requirement.reference;
            self.emit(AppEvent::Recipe(RecipeEvent::RequirementDeclared {
                recipe: self.recipe.name().to_string(),
                reference: reference.to_string(),
                transitive_headers: requirement.transitive_headers,
                transitive_libs: requirement.transitive_libs,
                testing_channel: reference.is_testing_channel(),
            }));
            if reference.is_testing_channel() {
                self.emit_warning_with_context(
                    format!("{reference} comes from a testing channel"),
                    "pin a stable channel before publishing this package",
                );
            }
        }

        if self.resolve_dependencies {
            let resolver = DependencyResolver::new(self.context.cache_root.clone())
                .with_event_sender(self.context.event_sender.clone());
            self.state.dependencies = Some(resolver.resolve_all(&requirements).await?);
        }
        self.state.requirements = Some(requirements);
        Ok(())
    }

    async fn layout(&mut self) -> Result<(), Error> {
        let version = self
            .state
            .version
            .clone()
            .ok_or_else(|| out_of_order(Phase::Layout, Phase::SetVersion))?;
        let options = self
            .state
            .options
            .as_ref()
            .ok_or_else(|| out_of_order(Phase::Layout, Phase::ConfigOptions))?;
        let requirements = self
            .state
            .requirements
            .as_ref()
            .filter(|_| self.state.dependencies.is_some())
            .ok_or_else(|| out_of_order(Phase::Layout, Phase::Requirements))?;

        let package_id = compute_package_id(&self.context.settings, options, requirements);
        let own = PackageRef {
            name: self.recipe.name().to_string(),
            version,
            user: None,
            channel: None,
        };
        let reference_root = reference_folder(&self.context.cache_root, &own);
        let base = self
            .context
            .build_root
            .clone()
            .unwrap_or_else(|| reference_root.join("build").join(&package_id));

        let source_folder = if self.context.exports {
            let export_folder = base.join("export_source");
            export_sources(
                &self.context.recipe_folder,
                &export_folder,
                &self.recipe.exports_sources,
                &self.recipe.license_file,
                Some(&base),
                &*self,
            )
            .await?;
            export_folder
        } else {
            self.context.recipe_folder.clone()
        };

        let layout = cmake_layout(&base, &source_folder, &self.context.settings);
        self.emit_debug(format!(
            "layout: source {} build {}",
            layout.source_folder.display(),
            layout.build_folder.display()
        ));

        self.state.package_folder = Some(reference_root.join("package").join(&package_id));
        self.state.package_id = Some(package_id);
        self.state.layout = Some(layout);
        Ok(())
    }

    fn build_system_context(&self) -> Result<BuildSystemContext, Error> {
        let layout = self
            .state
            .layout
            .as_ref()
            .ok_or_else(|| out_of_order(Phase::Build, Phase::Layout))?;
        let package_folder = self
            .state
            .package_folder
            .clone()
            .ok_or_else(|| out_of_order(Phase::Build, Phase::Layout))?;

        let env = BuildEnvironment::new(self.recipe.name(), self.context.event_sender.clone());
        let settings = &self.context.settings;
        Ok(BuildSystemContext::new(
            env,
            layout.source_folder.clone(),
            layout.build_folder.clone(),
        )
        .with_generators_dir(layout.generators_folder.clone())
        .with_package_dir(package_folder)
        .with_build_type(settings.build_type, settings.compiler.is_multi_config())
        .with_jobs(self.context.jobs))
    }

    async fn build(&mut self) -> Result<(), Error> {
        let ctx = self.build_system_context()?;
        if !self.build_system.detect(&ctx.source_dir).await? {
            return Err(BuildError::RecipeError {
                message: format!(
                    "{} cannot build {}",
                    self.build_system.name(),
                    ctx.source_dir.display()
                ),
            }
            .into());
        }
        let options = self
            .state
            .options
            .as_ref()
            .ok_or_else(|| out_of_order(Phase::Build, Phase::ConfigOptions))?;
        let dependencies = self
            .state
            .dependencies
            .as_deref()
            .ok_or_else(|| out_of_order(Phase::Build, Phase::Requirements))?;

        let toolchain = generate_toolchain(
            self.recipe.name(),
            &ctx.generators_dir,
            &self.context.settings,
            options,
            dependencies,
        )
        .await?;
        self.emit(AppEvent::Build(BuildEvent::FileGenerated {
            generator: "toolchain".to_string(),
            path: toolchain.clone(),
        }));
        for path in generate_dependency_configs(&ctx.generators_dir, dependencies).await? {
            self.emit(AppEvent::Build(BuildEvent::FileGenerated {
                generator: "deps".to_string(),
                path,
            }));
        }

        let ctx = ctx.with_toolchain_file(toolchain);
        self.build_system.configure(&ctx, &[]).await?;
        self.build_system.build(&ctx, &[]).await?;
        self.state.built = true;
        Ok(())
    }

    async fn package(&mut self) -> Result<(), Error> {
        if !self.state.built {
            return Err(out_of_order(Phase::Package, Phase::Build));
        }
        let ctx = self.build_system_context()?;
        let package_folder = ctx.package_dir.clone();

        if fs::try_exists(&package_folder).await? {
            fs::remove_dir_all(&package_folder)
                .await
                .map_err(|e| Error::io_with_path(&e, &package_folder))?;
        }

        copy_license(
            &ctx.source_dir,
            &self.recipe.license_file,
            &package_folder,
            &*self,
        )
        .await?;
        self.build_system.install(&ctx).await?;
        for relative in &self.recipe.prune {
            prune_directory(&package_folder, relative, &*self).await?;
        }

        self.state.packaged = true;
        Ok(())
    }

    async fn package_info(&mut self) -> Result<(), Error> {
        let version = self
            .state
            .version
            .clone()
            .ok_or_else(|| out_of_order(Phase::PackageInfo, Phase::SetVersion))?;
        let info = self.recipe.package_info(version);

        if self.state.packaged {
            if let Some(package_folder) = &self.state.package_folder {
                write_package_info(package_folder, &info, &*self).await?;
            }
        }

        self.state.package_info = Some(info);
        Ok(())
    }
}
