use std::path::{Path, PathBuf};
use fern::colors::{Color, ColoredLevelConfig};

/// Setup of the global logger of the `plates` binary.
///
/// Console messages go to `stderr`, so that reports printed to
/// `stdout` stay clean.  A log file is opened only in a directory
/// given explicitly, see [`Logger::with_log_dir()`].
///
/// Problems met before [`Logger::apply()`] can't be logged, so they
/// are reported directly to `stderr`, and the affected sink is
/// skipped.
pub struct Logger {
    app_name: String,
    colors:   ColoredLevelConfig,
    sinks:    Vec<fern::Dispatch>,
    log_path: Option<PathBuf>,
}

impl Logger {
    pub fn new<S: AsRef<str>>(app_name: S) -> Self {
        let colors = ColoredLevelConfig::new()
            .trace(Color::Blue)
            .debug(Color::Yellow)
            .info(Color::Green)
            .warn(Color::Magenta)
            .error(Color::Red);

        Self { app_name: app_name.as_ref().to_owned(), colors, sinks: Vec::new(), log_path: None }
    }

    pub fn with_console(mut self, level: log::LevelFilter) -> Self {
        let colors = self.colors;

        self.sinks.push(
            fern::Dispatch::new()
                .format(move |out, message, record| match record.level() {
                    log::Level::Info => out.finish(format_args!("{}.", message)),
                    level @ log::Level::Error => out.finish(format_args!(
                        "[{}]\t\x1B[{}m{}.\x1B[0m",
                        colors.color(level),
                        colors.get_color(&level).to_fg_str(),
                        message
                    )),
                    level => out.finish(format_args!("[{}]\t{}.", colors.color(level), message)),
                })
                .level(level)
                .chain(std::io::stderr()),
        );

        self
    }

    /// Adds a log file named `filename` in directory `dirname`,
    /// creating the directory if needed.
    pub fn with_log_dir<D, F>(mut self, dirname: D, filename: F, level: log::LevelFilter) -> Self
    where
        D: AsRef<Path>,
        F: AsRef<Path>,
    {
        let dir = dirname.as_ref();

        if dir.exists() && !dir.is_dir() {
            self.report(format_args!("\"{}\" isn't a directory, no log file", dir.display()));
            return self
        }

        if let Err(err) = std::fs::create_dir_all(dir) {
            self.report(format_args!("Can't create \"{}\": {}", dir.display(), err));
            return self
        }

        let path = dir.join(filename);

        match fern::log_file(&path) {
            Ok(file) => {
                let app_name = self.app_name.clone();

                self.sinks.push(
                    fern::Dispatch::new()
                        .format(move |out, message, record| {
                            out.finish(format_args!(
                                "{} [{}][{}] {}.",
                                app_name,
                                record.level(),
                                record.target(),
                                message,
                            ))
                        })
                        .level(level)
                        .chain(file),
                );
                self.log_path = Some(path);
            }
            Err(err) => self.report(format_args!("Can't open \"{}\": {}", path.display(), err)),
        }

        self
    }

    /// Path of the log file, if one was opened.
    pub fn get_log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Installs all sinks as the global logger.
    pub fn apply(self) {
        let dispatcher =
            self.sinks.into_iter().fold(fern::Dispatch::new(), |dispatcher, sink| dispatcher.chain(sink));

        if let Err(err) = dispatcher.apply() {
            eprintln!("[{}]\t{}.", self.colors.color(log::Level::Error), err);
        }
    }

    fn report(&self, message: std::fmt::Arguments) {
        let level = log::Level::Error;

        eprintln!(
            "[{}]\t\x1B[{}m{}.\x1B[0m",
            self.colors.color(level),
            self.colors.get_color(&level).to_fg_str(),
            message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("plates-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_log_dir_created() {
        let dir = scratch_dir("created").join("nested");
        let logger = Logger::new("plates").with_log_dir(&dir, "plan.log", log::LevelFilter::Debug);
        assert!(dir.is_dir());
        assert_eq!(logger.get_log_path(), Some(dir.join("plan.log").as_path()));
        assert_eq!(logger.sinks.len(), 1);
        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }

    #[test]
    fn test_log_dir_not_a_directory() {
        let dir = scratch_dir("file");
        std::fs::write(&dir, "").unwrap();
        let logger = Logger::new("plates")
            .with_console(log::LevelFilter::Warn)
            .with_log_dir(&dir, "plan.log", log::LevelFilter::Debug);
        assert!(logger.get_log_path().is_none());
        assert_eq!(logger.sinks.len(), 1);
        let _ = std::fs::remove_file(&dir);
    }
}
