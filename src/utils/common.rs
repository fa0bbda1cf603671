use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

// 计算程序运行的总时长
pub fn format_duration(duration: Duration) -> (f64, &'static str) {
    if duration.as_secs() > 0 {
        (duration.as_secs_f64(), "秒")
    } else if duration.as_millis() > 0 {
        (duration.as_millis() as f64, "毫秒")
    } else if duration.as_micros() > 0 {
        (duration.as_micros() as f64, "微秒")
    } else {
        (duration.as_nanos() as f64, "纳秒")
    }
}

// 询问 y/n，只有 y（不区分大小写）算同意
pub fn confirm<R, W>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{} (y/n): ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_largest_unit() {
        assert_eq!(format_duration(Duration::from_millis(1500)), (1.5, "秒"));
        assert_eq!(format_duration(Duration::from_millis(20)), (20.0, "毫秒"));
        assert_eq!(format_duration(Duration::from_nanos(7)), (7.0, "纳秒"));
    }

    #[test]
    fn only_y_confirms() {
        let mut out = Vec::new();
        assert!(confirm("数据库已经更新了吗？", &mut "Y\n".as_bytes(), &mut out).unwrap());
        assert!(!confirm("数据库已经更新了吗？", &mut "yes\n".as_bytes(), &mut out).unwrap());
        assert!(!confirm("数据库已经更新了吗？", &mut "".as_bytes(), &mut out).unwrap());
        assert!(String::from_utf8(out).unwrap().ends_with("(y/n): "));
    }
}
