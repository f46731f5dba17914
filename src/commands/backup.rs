use crate::storage::Storage;
use anyhow::Result;

pub fn cmd(store: &dyn Storage) -> Result<()> {
    let path = store.backup()?;
    println!("Backup written to {}", path.display());
    Ok(())
}
