use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
};

use byteorder::{LittleEndian, WriteBytesExt};

pub fn open_create_file<P>(path: P) -> Result<File, std::io::Error>
where
    P: AsRef<Path>,
{
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Write `header` followed by little-endian `samples`
pub fn write_volume<P>(path: P, header: &[u8], samples: &[u16]) -> Result<(), std::io::Error>
where
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(open_create_file(path)?);
    writer.write_all(header)?;
    for &sample in samples {
        writer.write_u16::<LittleEndian>(sample)?;
    }
    writer.flush()
}
