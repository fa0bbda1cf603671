use crate::utils::error::Result;

use csv::{ReaderBuilder, WriterBuilder};
use log::info;
use std::{fs::File, path::Path};

/// 整个表格读进内存：第一行是表头，其余是数据行。行长度可以不一致。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn read<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let file = File::open(&path)?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut records = rdr.records();
        let header: Vec<String> = match records.next() {
            Some(record) => record?.iter().map(str::to_string).collect(),
            None => Vec::new(),
        };
        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in records {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        info!("读取{}，共{}行数据", path.as_ref().display(), rows.len());

        Ok(Self { header, rows })
    }

    // 整体覆盖写回，不做临时文件替换
    pub fn write<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let file = File::create(&path)?;
        let mut wtr = WriterBuilder::new().flexible(true).from_writer(file);
        if !self.header.is_empty() {
            wtr.write_record(&self.header)?;
        }
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        info!("已写入{}", path.as_ref().display());
        Ok(())
    }
}
