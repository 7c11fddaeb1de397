//! 加锁追加写入
use crate::error::Result;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// 确保输出文件的父目录存在
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// 持有排他锁的文件，drop 时解锁并关闭
struct LockedFile<'a> {
    file: File,
    path: &'a Path,
}

impl<'a> LockedFile<'a> {
    /// 阻塞直到获得排他锁
    fn acquire(file: File, path: &'a Path) -> Result<Self> {
        file.lock().map_err(|e| {
            crate::file_error!(LockFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        })?;
        Ok(Self { file, path })
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.file.write_all(bytes).map_err(|e| {
            crate::file_error!(WriteFailed {
                path: self.path.to_path_buf(),
                reason: e.to_string(),
            })
        })
    }
}

impl Drop for LockedFile<'_> {
    fn drop(&mut self) {
        // 关闭文件同样会释放锁，这里显式解锁
        let _ = self.file.unlock();
    }
}

/// 追加一行：打开 → 加锁 → 写入 → 解锁 → 关闭
///
/// 行内容与换行符一次写入，并发写者之间不会交错出半行。
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    ensure_parent_dir(path).map_err(|e| {
        crate::file_error!(CreateDirectoryFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    })?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            crate::file_error!(OpenFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        })?;

    let mut locked = LockedFile::acquire(file, path)?;

    let mut entry = String::with_capacity(line.len() + 1);
    entry.push_str(line);
    entry.push('\n');
    locked.write_all(entry.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, FileError};

    #[test]
    fn test_append_creates_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/app.log");

        append_line(&path, "first").unwrap();
        append_line(&path, "second").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_append_bare_file_name_parent() {
        // 相对路径 "x.log" 的父目录为空字符串，不需要创建
        assert!(ensure_parent_dir(Path::new("x.log")).is_ok());
    }

    #[test]
    fn test_append_into_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = append_line(dir.path(), "line").unwrap_err();
        assert!(matches!(err, Error::File(FileError::OpenFailed { .. })));
    }

    #[test]
    fn test_lock_released_after_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked.log");
        append_line(&path, "one").unwrap();

        // 锁已释放，可以再次拿到
        let file = OpenOptions::new().append(true).open(&path).unwrap();
        assert!(file.try_lock().is_ok());
    }
}
