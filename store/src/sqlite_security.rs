//! Owner-only permissions for the task database and its directory.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};

/// Create the database's parent directory and file with owner-only permissions.
pub(crate) fn prepare_db_path(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_secure_dir(parent).map_err(|source| StoreError::Filesystem {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    ensure_secure_db_files(path).map_err(|source| StoreError::Filesystem {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_secure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::{MetadataExt, PermissionsExt};

        let metadata = fs::metadata(path)?;
        // Shared directories (e.g. a tempdir parent) are left alone.
        let our_uid = unsafe { libc::getuid() };
        if metadata.uid() != our_uid {
            return Ok(());
        }
        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
        }
    }
    Ok(())
}

fn ensure_secure_db_files(path: &Path) -> io::Result<()> {
    if !path.exists() {
        let mut options = OpenOptions::new();
        options.create(true).truncate(false).read(true).write(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        options.open(path)?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        for suffix in ["-wal", "-shm"] {
            let sidecar = sidecar_path(path, suffix);
            if sidecar.exists()
                && let Err(err) = fs::set_permissions(&sidecar, fs::Permissions::from_mode(0o600))
            {
                tracing::warn!(
                    path = %sidecar.display(),
                    "Failed to restrict database sidecar permissions: {err}"
                );
            }
        }
    }
    Ok(())
}

fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    match path.file_name() {
        Some(name) => path.with_file_name(format!("{}{suffix}", name.to_string_lossy())),
        None => PathBuf::from(format!("{}{suffix}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{prepare_db_path, sidecar_path};

    #[test]
    fn sidecar_appends_suffix_to_file_name() {
        let path = Path::new("/tmp/tasks.db");
        assert_eq!(sidecar_path(path, "-wal"), Path::new("/tmp/tasks.db-wal"));
    }

    #[test]
    fn prepare_creates_nested_directories_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("deeper").join("tasks.db");
        prepare_db_path(&db).unwrap();
        assert!(db.exists());
    }

    #[cfg(unix)]
    #[test]
    fn prepared_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("data").join("tasks.db");
        prepare_db_path(&db).unwrap();

        let file_mode = std::fs::metadata(&db).unwrap().permissions().mode() & 0o777;
        assert_eq!(file_mode, 0o600);
        let dir_mode = std::fs::metadata(db.parent().unwrap())
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(dir_mode & 0o077, 0);
    }

    #[cfg(unix)]
    #[test]
    fn existing_sidecars_are_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("tasks.db");
        let wal = sidecar_path(&db, "-wal");
        std::fs::write(&wal, b"").unwrap();
        std::fs::set_permissions(&wal, std::fs::Permissions::from_mode(0o644)).unwrap();

        prepare_db_path(&db).unwrap();

        let wal_mode = std::fs::metadata(&wal).unwrap().permissions().mode() & 0o777;
        assert_eq!(wal_mode, 0o600);
        assert!(!sidecar_path(&db, "-shm").exists());
    }
}
