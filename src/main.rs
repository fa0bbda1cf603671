mod utils;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::{
    error::Error,
    io,
    path::PathBuf,
    time::Instant,
};

use crate::utils::{
    builder::RecordBuilder,
    common::{confirm, format_duration},
    files::Sheet,
    geo::GeoTimezoneResolver,
    logger::init_logger,
    models::ColumnLayout,
    overrides::OverrideTable,
    patcher::RowPatcher,
    store::{EnvelopeCodec, PlainCodec, RecordStore, DEFAULT_STORE_PATH},
};

/// 机场时区信息整理：按坐标找时区，计算偏移和夏令时切换日期，保存到 JSON 数据库，再写回表格
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// 机场表格（CSV，第一行为表头）
    file: PathBuf,

    /// JSON 数据库文件
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    db: PathBuf,

    /// 时区替换表（JSON 对象），不指定时使用内置的替换表
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// 数据库文件的编码方式
    #[arg(long, value_enum, default_value_t = StoreFormat::Envelope)]
    store_format: StoreFormat,

    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// 更新数据库（可跳过），再把夏令时切换日期写回表格
    Dst {
        year: String,
        /// 数据库已经是最新的，不询问直接写回表格
        #[arg(long, conflicts_with = "rebuild")]
        store_updated: bool,
        /// 不询问，先重建数据库
        #[arg(long)]
        rebuild: bool,
    },
    /// 只读取数据库
    New { year: String },
    /// 按代码查询数据库
    Get { code: String },
    /// 只重建数据库
    Update { year: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreFormat {
    /// JSON 文本再包一层 JSON 字符串（兼容已有文件）
    Envelope,
    /// 普通 JSON 对象
    Plain,
}

impl Cli {
    fn open_store(&self) -> RecordStore {
        match self.store_format {
            StoreFormat::Envelope => RecordStore::new(&self.db, EnvelopeCodec),
            StoreFormat::Plain => RecordStore::new(&self.db, PlainCodec),
        }
    }

    fn override_table(&self) -> utils::error::Result<OverrideTable> {
        match &self.overrides {
            Some(path) => OverrideTable::from_json_file(path),
            None => Ok(OverrideTable::default()),
        }
    }
}

// 读取表格，为每个机场生成记录并整体覆盖数据库
fn rebuild_store(cli: &Cli, year: &str) -> utils::error::Result<()> {
    let sheet = Sheet::read(&cli.file)?;
    let resolver = GeoTimezoneResolver::with_boundaries(cli.override_table()?);
    let builder = RecordBuilder::new(resolver, ColumnLayout::default());
    let snapshot = builder.build_all(&sheet, year)?;
    cli.open_store().save(&snapshot)
}

// 用数据库中的切换日期更新表格
fn update_dst(cli: &Cli) -> utils::error::Result<()> {
    let snapshot = cli.open_store().load()?;
    let mut sheet = Sheet::read(&cli.file)?;
    RowPatcher::new(ColumnLayout::default()).patch_all(&mut sheet, &snapshot)?;
    sheet.write(&cli.file)
}

fn main() -> Result<(), Box<dyn Error>> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    init_logger(cli.log_level)?;

    match &cli.mode {
        Mode::Dst {
            year,
            store_updated,
            rebuild,
        } => {
            // 开始处理之前就决定是否重建数据库
            let rebuild_first = if *rebuild {
                true
            } else if *store_updated {
                false
            } else {
                let stdin = io::stdin();
                !confirm("数据库已经更新了吗？", &mut stdin.lock(), &mut io::stdout())?
            };
            if rebuild_first {
                rebuild_store(&cli, year)?;
            }
            update_dst(&cli)?;
        }
        Mode::New { year } => {
            let snapshot = cli.open_store().load()?;
            info!("数据库共{}条记录（{}年），暂不导出", snapshot.len(), year);
        }
        Mode::Get { code } => {
            let code = code.to_uppercase();
            match cli.open_store().lookup(&code)? {
                Some(record) => println!(
                    "{} | {} | {} | {} | {} | {} | {} | {:?}",
                    record.code,
                    record.name,
                    record.timezone_text(),
                    record.latitude,
                    record.longitude,
                    record.standard_offset_text(),
                    record.seasonal_seconds_text(),
                    record.transition_dates
                ),
                None => println!("数据库中没有 {}", code),
            }
        }
        Mode::Update { year } => rebuild_store(&cli, year)?,
    }

    let (elapsed_time, unit) = format_duration(start_time.elapsed());
    info!("程序运行结束，耗时：{:.2} {}", elapsed_time, unit);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn year_is_required() {
        assert!(Cli::try_parse_from(["airport-tz-sync", "airports.csv", "update"]).is_err());
        assert!(Cli::try_parse_from(["airport-tz-sync", "airports.csv", "get"]).is_err());
        assert!(Cli::try_parse_from(["airport-tz-sync", "airports.csv"]).is_err());
    }

    #[test]
    fn dst_flags_conflict() {
        assert!(Cli::try_parse_from([
            "airport-tz-sync",
            "airports.csv",
            "dst",
            "2021",
            "--store-updated",
            "--rebuild"
        ])
        .is_err());
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["airport-tz-sync", "airports.csv", "get", "jfk"]).unwrap();
        assert_eq!(cli.db, PathBuf::from("airport-db.json"));
        assert_eq!(cli.store_format, StoreFormat::Envelope);
        assert_eq!(cli.log_level, log::LevelFilter::Info);
        assert!(matches!(cli.mode, Mode::Get { ref code } if code == "jfk"));
    }

    #[test]
    fn rebuild_then_patch_end_to_end() {
        use crate::utils::files::tests::temp_path;
        use std::fs;

        let file = temp_path("e2e.csv");
        let db = temp_path("e2e.json");
        fs::write(
            &file,
            "iata,name,country,lat,lon,offset,dst_start,dst_end\n\
             JFK,John F Kennedy,US,40.6413,-73.7781,,,\n\
             XYZ,Mid Atlantic,,0.0,-30.0,,keep,keep\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "airport-tz-sync",
            file.to_str().unwrap(),
            "--db",
            db.to_str().unwrap(),
            "dst",
            "2021",
            "--rebuild",
        ])
        .unwrap();
        rebuild_store(&cli, "2021").unwrap();
        update_dst(&cli).unwrap();

        let sheet = Sheet::read(&file).unwrap();
        assert_eq!(sheet.rows[0][6], "14/03/21");
        assert_eq!(sheet.rows[0][7], "07/11/21");
        assert_eq!(sheet.rows[1][6], "keep");
        assert_eq!(sheet.rows[1][7], "keep");

        fs::remove_file(&file).unwrap();
        fs::remove_file(&db).unwrap();
    }
}
