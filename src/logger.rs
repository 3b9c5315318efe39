use super::*;

fn binary_name() -> String {
    Path::new(&stdenv::args().next().unwrap_or_default())
        .file_name()
        .unwrap_or_default()
        .to_str()
        .unwrap_or_default()
        .to_owned()
}

/// Coloured env_logger output. `RUST_LOG=trace` drops the name/timestamp
/// prefix and keeps only `file:line level: message`.
pub fn setup_logger() {
    let short_format = matches!(
        stdenv::var("RUST_LOG"),
        Ok(val) if val.to_lowercase() == "trace"
    );
    let name_with_version = format!("{}_{}", binary_name(), VERSION);

    Builder::from_env(Env::default().default_filter_or("info"))
        .format(move |buf, record| {
            let level = match record.level() {
                log::Level::Error => format!("{}", record.level()).red(),
                log::Level::Warn => format!(" {}", record.level()).yellow(),
                log::Level::Info => format!(" {}", record.level()).green(),
                log::Level::Debug => format!("{}", record.level()).blue(),
                log::Level::Trace => format!("{}", record.level()).purple(),
            };
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);

            if short_format {
                writeln!(buf, "{}:{} {}: {}", file, line, level, record.args())
            } else {
                writeln!(
                    buf,
                    "{}:{} [{} {}]{}: {}",
                    file,
                    line,
                    name_with_version.dimmed(),
                    Local::now().format("%Y%m%d %H:%M:%S").to_string().purple(),
                    level,
                    record.args()
                )
            }
        })
        .init();
    debug!("Logger initialized");
}
