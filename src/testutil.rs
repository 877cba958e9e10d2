use npyz::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::FileOptions;

/// Serialized f32 npy array of the given shape, filled with ramp values.
pub fn npy_bytes(shape: &[u64]) -> Vec<u8> {
    let count: u64 = shape.iter().product();
    let mut buf = vec![];
    {
        let mut writer = npyz::WriteOptions::new()
            .default_dtype()
            .shape(shape)
            .writer(&mut buf)
            .begin_nd()
            .expect("begin npy");
        writer
            .extend((0..count).map(|v| v as f32))
            .expect("write npy payload");
        writer.finish().expect("finish npy");
    }
    buf
}

pub fn write_archive(path: &Path, members: &[(&str, Vec<u8>)]) {
    let file = File::create(path).expect("create archive");
    let mut archive = zip::ZipWriter::new(file);
    for (name, bytes) in members {
        archive
            .start_file(*name, FileOptions::default())
            .expect("start archive member");
        archive.write_all(bytes).expect("write archive member");
    }
    archive.finish().expect("finish archive");
}

/// One episode file with an action trajectory of `frames` samples and an
/// optional label array of `segments` boundaries.
pub fn write_episode(path: &Path, frames: u64, segments: Option<u64>) {
    let mut members = vec![(crate::episode::ACTION_MEMBER, npy_bytes(&[frames, 14]))];
    if let Some(segments) = segments {
        members.push((crate::episode::SEGMENT_MEMBER, npy_bytes(&[segments])));
    }
    write_archive(path, &members);
}
