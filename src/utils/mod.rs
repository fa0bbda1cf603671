pub mod builder; // 由表格行生成机场记录
pub mod common; // 公共的函数，不好分类，可以迁移到其它项目的可能性高
pub mod error; // 错误类型
pub mod files; // 与文件相关，表格的读取和写回
pub mod geo; // 坐标 -> 时区
pub mod history; // 时区的历史转换记录
pub mod logger; // 日志初始化
pub mod models; // 机场记录和表格列定义
pub mod offset; // 标准偏移和夏令时调整量
pub mod overrides; // 改名/废弃时区的替换表
pub mod patcher; // 把切换日期写回表格
pub mod store; // JSON 数据库
pub mod transitions; // 某一年的夏令时切换日期
