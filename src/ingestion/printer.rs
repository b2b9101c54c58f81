use crate::registry::CacheInfo;
use std::io::{self, Write};

/// Writes one `Person name=<name>` line per result.
pub fn print_employees<W: Write>(out: &mut W, names: &[String]) -> io::Result<()> {
    for name in names {
        writeln!(out, "Person name={}", name)?;
    }
    Ok(())
}

pub fn print_caches<W: Write>(out: &mut W, caches: &[CacheInfo]) -> io::Result<()> {
    for info in caches {
        writeln!(
            out,
            "Cache {} ({}): {:?}, backups={}, {} record(s) in {} partition(s), indexes={:?}",
            info.name, info.kind, info.mode, info.backups, info.size, info.partitions, info.indexes
        )?;
    }
    Ok(())
}
