//! Structured logging integration for events
//!
//! Converts domain events into `tracing` records with structured fields.
//! Levels come from [`AppEvent::log_level`].

use irrpkg_events::{AppEvent, BuildEvent, GeneralEvent, PackageEvent, RecipeEvent};
use tracing::Level;

macro_rules! event_at {
    ($level:expr, $target:literal, $($arg:tt)+) => {
        match $level {
            Level::ERROR => tracing::event!(target: $target, Level::ERROR, $($arg)+),
            Level::WARN => tracing::event!(target: $target, Level::WARN, $($arg)+),
            Level::INFO => tracing::event!(target: $target, Level::INFO, $($arg)+),
            Level::DEBUG => tracing::event!(target: $target, Level::DEBUG, $($arg)+),
            _ => tracing::event!(target: $target, Level::TRACE, $($arg)+),
        }
    };
}

/// Log an `AppEvent` with structured fields
pub fn log_event_with_tracing(event: &AppEvent) {
    let level = event.log_level();
    match event {
        AppEvent::General(general) => log_general(level, general),
        AppEvent::Recipe(recipe) => log_recipe(level, recipe),
        AppEvent::Build(build) => log_build(level, build),
        AppEvent::Package(package) => log_package(level, package),
    }
}

fn log_general(level: Level, event: &GeneralEvent) {
    match event {
        GeneralEvent::Warning { message, context } => {
            event_at!(level, "irrpkg::events::general", context = ?context, "{message}");
        }
        GeneralEvent::Error { message, details } => {
            event_at!(level, "irrpkg::events::general", details = ?details, "{message}");
        }
        GeneralEvent::DebugLog { message, context } => {
            event_at!(level, "irrpkg::events::general", context = ?context, "{message}");
        }
        GeneralEvent::OperationStarted { operation } => {
            event_at!(level, "irrpkg::events::general", operation = %operation, "Operation started");
        }
        GeneralEvent::OperationCompleted { operation, success } => {
            event_at!(
                level,
                "irrpkg::events::general",
                operation = %operation,
                success = success,
                "Operation completed"
            );
        }
    }
}

fn log_recipe(level: Level, event: &RecipeEvent) {
    match event {
        RecipeEvent::PhaseStarted { recipe, phase } => {
            event_at!(level, "irrpkg::events::recipe", recipe = %recipe, phase = %phase, "Phase started");
        }
        RecipeEvent::PhaseCompleted {
            recipe,
            phase,
            duration,
        } => {
            event_at!(
                level,
                "irrpkg::events::recipe",
                recipe = %recipe,
                phase = %phase,
                duration = ?duration,
                "Phase completed"
            );
        }
        RecipeEvent::PhaseFailed {
            recipe,
            phase,
            failure,
        } => {
            event_at!(
                level,
                "irrpkg::events::recipe",
                recipe = %recipe,
                phase = %phase,
                code = ?failure.code,
                error = %failure.message,
                hint = ?failure.hint,
                "Phase failed"
            );
        }
        RecipeEvent::VersionResolved {
            recipe,
            version,
            source,
        } => {
            event_at!(
                level,
                "irrpkg::events::recipe",
                recipe = %recipe,
                version = %version,
                source = %source,
                "Version resolved"
            );
        }
        RecipeEvent::OptionsResolved { recipe, options } => {
            let rendered = options.canonical_lines().join(" ");
            event_at!(
                level,
                "irrpkg::events::recipe",
                recipe = %recipe,
                options = %rendered,
                "Options resolved"
            );
        }
        RecipeEvent::RequirementDeclared {
            recipe,
            reference,
            transitive_headers,
            transitive_libs,
            testing_channel,
        } => {
            event_at!(
                level,
                "irrpkg::events::recipe",
                recipe = %recipe,
                reference = %reference,
                transitive_headers = transitive_headers,
                transitive_libs = transitive_libs,
                testing_channel = testing_channel,
                "Requirement declared"
            );
        }
    }
}

fn log_build(level: Level, event: &BuildEvent) {
    match event {
        BuildEvent::CommandStarted {
            package,
            command,
            working_dir,
        } => {
            event_at!(
                level,
                "irrpkg::events::build",
                package = %package,
                command = %command,
                working_dir = %working_dir.display(),
                "Command started"
            );
        }
        BuildEvent::OutputLine {
            package,
            line,
            stderr,
        } => {
            event_at!(
                level,
                "irrpkg::events::build",
                package = %package,
                stderr = stderr,
                "{line}"
            );
        }
        BuildEvent::CommandCompleted {
            package,
            command,
            duration,
        } => {
            event_at!(
                level,
                "irrpkg::events::build",
                package = %package,
                command = %command,
                duration = ?duration,
                "Command completed"
            );
        }
        BuildEvent::CommandFailed {
            package,
            command,
            exit_code,
        } => {
            event_at!(
                level,
                "irrpkg::events::build",
                package = %package,
                command = %command,
                exit_code = ?exit_code,
                "Command failed"
            );
        }
        BuildEvent::FileGenerated { generator, path } => {
            event_at!(
                level,
                "irrpkg::events::build",
                generator = %generator,
                path = %path.display(),
                "File generated"
            );
        }
    }
}

fn log_package(level: Level, event: &PackageEvent) {
    match event {
        PackageEvent::FileCopied { from, to } => {
            event_at!(
                level,
                "irrpkg::events::package",
                from = %from.display(),
                to = %to.display(),
                "File copied"
            );
        }
        PackageEvent::DirectoryPruned { path, existed } => {
            event_at!(
                level,
                "irrpkg::events::package",
                path = %path.display(),
                existed = existed,
                "Directory pruned"
            );
        }
        PackageEvent::PackageInfoPublished {
            package,
            path,
            components,
        } => {
            event_at!(
                level,
                "irrpkg::events::package",
                package = %package,
                path = %path.display(),
                components = ?components,
                "Package info published"
            );
        }
    }
}
