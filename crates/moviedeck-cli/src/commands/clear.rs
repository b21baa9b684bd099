use super::context::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs;
use std::path::Path;

pub fn run_clear(all: bool, storage: bool, credentials: bool, logs: bool, context: &AppContext, output: &Output) -> Result<()> {
    let paths = &context.paths;

    if all {
        clear_file(&paths.storage_file(), "storage", output)?;
        clear_file(&paths.credentials_file(), "credentials", output)?;
        clear_logs(paths.log_dir(), output)?;
        output.success("All local storage, credentials and logs cleared");
        return Ok(());
    }

    let mut cleared_anything = false;

    if storage {
        clear_file(&paths.storage_file(), "storage", output)?;
        cleared_anything = true;
    }

    if credentials {
        clear_file(&paths.credentials_file(), "credentials", output)?;
        cleared_anything = true;
    }

    if logs {
        clear_logs(paths.log_dir(), output)?;
        cleared_anything = true;
    }

    if !cleared_anything {
        output.warn("No clear option specified. Use --storage, --credentials, --logs, or --all");
        output.info("\nExample: moviedeck clear --storage");
    }

    Ok(())
}

fn clear_file(path: &Path, what: &str, output: &Output) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| eyre!("Failed to remove {} file at {}: {}", what, path.display(), e))?;
        output.success(format!("Cleared {}: {}", what, path.display()));
    } else {
        output.info(format!("No {} file found to clear", what));
    }
    Ok(())
}

fn clear_logs(log_dir: &Path, output: &Output) -> Result<()> {
    if log_dir.exists() {
        fs::remove_dir_all(log_dir).map_err(|e| eyre!("Failed to remove logs at {}: {}", log_dir.display(), e))?;
        output.success(format!("Cleared logs: {}", log_dir.display()));
    } else {
        output.info("No logs found to clear");
    }
    Ok(())
}
