// 初始化日志（设置日志格式）
pub fn init_logger(level: log::LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch
        ::new()
        .format(|out, message, record| {
            out.finish(
                format_args!(
                    "{} {:<5} [{}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                )
            )
        })
        .level(level)
        // 依赖库的调试日志太多
        .level_for("tzf_rs", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}
