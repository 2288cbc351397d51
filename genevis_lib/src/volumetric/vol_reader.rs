//! Reading `.vol` files
//!
//! Little-endian header, 26 bytes:
//! 1. resolution -- 3x 32bit ints (x,y,z)
//! 2. cell shape -- 3x 32bit floats
//! 3. bytes per sample -- 8bit, must be 2
//! 4. sample order -- 8bit, must be 1 (linear, z fastest)
//! 5. data -- x*y*z little-endian `u16` samples

use std::{fs::File, path::Path};

use byteorder::{ByteOrder, LittleEndian};
use log::info;
use memmap::{Mmap, MmapOptions};
use nalgebra::{vector, Vector3};
use nom::{
    number::complete::{le_f32, le_u32, u8 as byte},
    sequence::tuple,
    IResult,
};

use crate::error::VolumeError;

use super::ScalarVolume;

pub const HEADER_LEN: usize = 26;
pub const SAMPLE_BYTES: u8 = 2;
pub const LAYOUT_LINEAR: u8 = 1;

/// Raw bytes of a volume file
pub enum DataSource {
    Vec(Vec<u8>),
    Mmap(Mmap),
}

impl DataSource {
    pub fn get_slice(&self) -> &[u8] {
        match self {
            DataSource::Vec(v) => v.as_slice(),
            DataSource::Mmap(m) => &m[..],
        }
    }

    pub fn from_vec(vec: Vec<u8>) -> DataSource {
        DataSource::Vec(vec)
    }

    /// Memory map file at `path`
    pub fn from_file<P>(path: P) -> Result<DataSource, VolumeError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(VolumeError::Parse("path does not lead to a file"));
        }

        let file = File::open(path)?;

        // Safety: the map is read-only, the file is not expected to change while mapped
        let mmap = unsafe { MmapOptions::new().map(&file)? };

        Ok(DataSource::Mmap(mmap))
    }
}

/// Parsed `.vol` header
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeHeader {
    pub size: Vector3<usize>,
    /// Shape of cells, carried along, the renderer assumes unit cells
    pub scale: Vector3<f32>,
    pub sample_bytes: u8,
    pub layout: u8,
}

impl VolumeHeader {
    /// Header of a linear 16bit volume
    pub fn linear(size: Vector3<usize>, scale: Vector3<f32>) -> VolumeHeader {
        VolumeHeader {
            size,
            scale,
            sample_bytes: SAMPLE_BYTES,
            layout: LAYOUT_LINEAR,
        }
    }

    /// `None` if the count does not fit `usize`
    pub fn sample_count(&self) -> Option<usize> {
        self.size
            .x
            .checked_mul(self.size.y)?
            .checked_mul(self.size.z)
    }

    /// Encode as the 26 byte file header
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut vec = vec![0; HEADER_LEN];
        let slice = &mut vec[..];

        LittleEndian::write_u32(&mut slice[0..4], self.size.x as u32);
        LittleEndian::write_u32(&mut slice[4..8], self.size.y as u32);
        LittleEndian::write_u32(&mut slice[8..12], self.size.z as u32);
        LittleEndian::write_f32(&mut slice[12..16], self.scale.x);
        LittleEndian::write_f32(&mut slice[16..20], self.scale.y);
        LittleEndian::write_f32(&mut slice[20..24], self.scale.z);
        slice[24] = self.sample_bytes;
        slice[25] = self.layout;

        vec
    }
}

fn header_inner(s: &[u8]) -> IResult<&[u8], VolumeHeader> {
    let mut header = tuple((
        tuple((le_u32, le_u32, le_u32)),
        tuple((le_f32, le_f32, le_f32)),
        byte,
        byte,
    ));

    let (s, (size, scale, sample_bytes, layout)) = header(s)?;

    Ok((
        s,
        VolumeHeader {
            size: vector![size.0 as usize, size.1 as usize, size.2 as usize],
            scale: vector![scale.0, scale.1, scale.2],
            sample_bytes,
            layout,
        },
    ))
}

pub fn parse_header(slice: &[u8]) -> Result<VolumeHeader, VolumeError> {
    let (_, header) = header_inner(slice).map_err(|_| VolumeError::Parse("truncated header"))?;

    if header.sample_bytes != SAMPLE_BYTES {
        return Err(VolumeError::Parse("only 16bit samples are supported"));
    }
    if header.layout != LAYOUT_LINEAR {
        return Err(VolumeError::Parse("only linear sample order is supported"));
    }

    Ok(header)
}

/// Parse whole file contents into a volume
pub fn from_bytes(slice: &[u8]) -> Result<ScalarVolume, VolumeError> {
    let header = parse_header(slice)?;

    let body = &slice[HEADER_LEN..];
    let needed = header
        .sample_count()
        .and_then(|n| n.checked_mul(SAMPLE_BYTES as usize))
        .ok_or(VolumeError::Parse("volume too large"))?;
    if body.len() < needed {
        return Err(VolumeError::Parse("file ends before all samples"));
    }

    let data: Vec<u16> = body[..needed]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    ScalarVolume::new(header.size, data)
}

pub fn from_data_source(ds: &DataSource) -> Result<ScalarVolume, VolumeError> {
    from_bytes(ds.get_slice())
}

pub fn from_file<P>(path: P) -> Result<ScalarVolume, VolumeError>
where
    P: AsRef<Path>,
{
    let ds = DataSource::from_file(path.as_ref())?;
    let volume = from_data_source(&ds)?;
    info!(
        "Read {:?}, {} samples",
        path.as_ref(),
        volume.voxel_count()
    );
    Ok(volume)
}

#[cfg(test)]
mod test {

    use super::*;

    fn header_bytes(x: u32, y: u32, z: u32, sample_bytes: u8, layout: u8) -> Vec<u8> {
        let mut v = Vec::new();
        for d in [x, y, z] {
            v.extend_from_slice(&d.to_le_bytes());
        }
        for s in [1.0f32, 1.0, 2.5] {
            v.extend_from_slice(&s.to_le_bytes());
        }
        v.push(sample_bytes);
        v.push(layout);
        v
    }

    #[test]
    fn header() {
        let bytes = header_bytes(4, 5, 6, 2, 1);
        assert_eq!(bytes.len(), HEADER_LEN);

        let header = parse_header(&bytes).unwrap();
        assert_eq!(header.size, vector![4, 5, 6]);
        assert_eq!(header.scale, vector![1.0, 1.0, 2.5]);
        assert_eq!(header.sample_count(), Some(120));
    }

    #[test]
    fn samples() {
        let mut bytes = header_bytes(1, 2, 2, 2, 1);
        for s in [0u16, 300, 145, 65535] {
            bytes.extend_from_slice(&s.to_le_bytes());
        }

        let vol = from_data_source(&DataSource::from_vec(bytes)).unwrap();
        assert_eq!(vol.shape(), vector![1, 2, 2]);
        assert_eq!(vol.data(), &[0, 300, 145, 65535]);
    }

    #[test]
    fn truncated() {
        let bytes = header_bytes(2, 2, 2, 2, 1);
        assert!(matches!(from_bytes(&bytes), Err(VolumeError::Parse(_))));
        assert!(matches!(from_bytes(&bytes[..10]), Err(VolumeError::Parse(_))));
    }

    #[test]
    fn huge_dims() {
        let bytes = header_bytes(u32::MAX, u32::MAX, u32::MAX, 2, 1);
        let header = parse_header(&bytes).unwrap();
        assert_eq!(header.sample_count(), None);
        assert!(matches!(
            from_bytes(&bytes),
            Err(VolumeError::Parse("volume too large"))
        ));

        // count fits, the data is missing
        let bytes = header_bytes(u32::MAX, 2, 1, 2, 1);
        assert!(matches!(from_bytes(&bytes), Err(VolumeError::Parse(_))));
    }

    #[test]
    fn encoded_header() {
        let header = VolumeHeader::linear(vector![3, 4, 5], vector![1.0, 0.5, 2.0]);
        let bytes = header.to_bytes();
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(&bytes[..12], &header_bytes(3, 4, 5, 2, 1)[..12]);
        assert_eq!(parse_header(&bytes).unwrap(), header);
    }

    #[test]
    fn unsupported() {
        let bytes = header_bytes(1, 1, 1, 1, 1);
        assert!(parse_header(&bytes).is_err());
        let bytes = header_bytes(1, 1, 1, 2, 2);
        assert!(parse_header(&bytes).is_err());
    }

    #[test]
    fn missing_file() {
        let res = from_file("definitely/not/here.vol");
        assert!(res.is_err());
    }
}
