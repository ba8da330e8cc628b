//! `gazette keygen` — Ed25519 signing key generation.
//!
//! The key binds a website to its stable pointer address: the address is
//! derived from the verifying key, so whoever holds the key file can keep
//! updating the content behind the same address.

use std::path::PathBuf;

use clap::Args;
use ed25519_dalek::SigningKey;
use rand_core::OsRng;

use gazette_storage::PointerAddress;

#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// File to write the hex-encoded signing key to.
    #[arg(long, short)]
    pub output: PathBuf,

    /// Overwrite an existing key file.
    #[arg(long)]
    pub force: bool,
}

pub fn run_keygen(args: &KeygenArgs) -> anyhow::Result<u8> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "key file {} already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    let key = SigningKey::generate(&mut OsRng);
    let address = PointerAddress::from_verifying_key(&key.verifying_key());

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.output, hex::encode(key.to_bytes()))?;
    set_owner_only(&args.output)?;

    println!("key:     {}", args.output.display());
    println!("address: {address}");
    Ok(0)
}

#[cfg(unix)]
fn set_owner_only(path: &std::path::Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn set_owner_only(_path: &std::path::Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_signing_key;

    #[test]
    fn keygen_writes_loadable_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.key");
        let args = KeygenArgs {
            output: path.clone(),
            force: false,
        };

        assert_eq!(run_keygen(&args).unwrap(), 0);
        let key = load_signing_key(&path).unwrap();
        // Address derivation must agree with the storage layer.
        let _ = PointerAddress::from_verifying_key(&key.verifying_key());
    }

    #[test]
    fn keygen_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.key");
        std::fs::write(&path, "existing").unwrap();

        let args = KeygenArgs {
            output: path.clone(),
            force: false,
        };
        assert!(run_keygen(&args).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");
    }

    #[test]
    fn keygen_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.key");
        std::fs::write(&path, "existing").unwrap();

        let args = KeygenArgs {
            output: path.clone(),
            force: true,
        };
        assert_eq!(run_keygen(&args).unwrap(), 0);
        assert!(load_signing_key(&path).is_ok());
    }
}
