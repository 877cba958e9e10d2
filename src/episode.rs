use anyhow::{anyhow, Context, Result};
use npyz::NpyFile;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// Archive member holding the action trajectory. Its first-dimension length
/// is the episode's frame count.
pub const ACTION_MEMBER: &str = "action.npy";
/// Optional archive member holding task-phase boundary labels.
pub const SEGMENT_MEMBER: &str = "label/task_timestep.npy";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeStat {
    pub frame_count: u64,
    pub segment_count: u64,
}

/// Batch mode tolerates a missing label member (counts as zero segments);
/// single-folder analysis requires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPolicy {
    Optional,
    Required,
}

/// Reads frame and segment counts from one episode archive. Only the npy
/// headers are parsed; array payloads are never loaded. The file handle is
/// scoped to this call and released on every exit path.
pub fn read_episode_stats(path: &Path, segments: SegmentPolicy) -> Result<EpisodeStat> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("not a readable episode archive: {}", path.display()))?;

    let frame_count = member_rows(&mut archive, ACTION_MEMBER)?
        .ok_or_else(|| anyhow!("missing '{}' array in {}", ACTION_MEMBER, path.display()))?;

    let segment_count = match member_rows(&mut archive, SEGMENT_MEMBER)? {
        Some(rows) => rows,
        None if segments == SegmentPolicy::Required => {
            return Err(anyhow!(
                "missing '{}' array in {}",
                SEGMENT_MEMBER,
                path.display()
            ));
        }
        None => 0,
    };

    Ok(EpisodeStat {
        frame_count,
        segment_count,
    })
}

/// First-dimension length of the named member, or None when the member is
/// absent from the archive. A 0-d array counts as zero rows.
fn member_rows<R: Read + Seek>(archive: &mut ZipArchive<R>, member: &str) -> Result<Option<u64>> {
    let entry = match archive.by_name(member) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read archive member '{member}'"))
        }
    };
    let npy = NpyFile::new(BufReader::new(entry))
        .with_context(|| format!("member '{member}' is not a valid npy array"))?;
    Ok(Some(npy.shape().first().copied().unwrap_or(0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::write_episode;
    use tempfile::TempDir;

    #[test]
    fn reads_frame_and_segment_counts() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("episode_0.npz");
        write_episode(&path, 120, Some(4));

        let stat = read_episode_stats(&path, SegmentPolicy::Optional).expect("read episode");
        assert_eq!(stat.frame_count, 120);
        assert_eq!(stat.segment_count, 4);
    }

    #[test]
    fn missing_label_member_counts_zero_segments_when_optional() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("episode_1.npz");
        write_episode(&path, 75, None);

        let stat = read_episode_stats(&path, SegmentPolicy::Optional).expect("read episode");
        assert_eq!(stat.frame_count, 75);
        assert_eq!(stat.segment_count, 0);
    }

    #[test]
    fn missing_label_member_is_fatal_when_required() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("episode_2.npz");
        write_episode(&path, 75, None);

        let err = read_episode_stats(&path, SegmentPolicy::Required)
            .expect_err("missing label must fail");
        assert!(err.to_string().contains(SEGMENT_MEMBER), "{err}");
    }

    #[test]
    fn missing_action_member_is_always_fatal() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("no_action.npz");
        crate::testutil::write_archive(&path, &[("other.npy", crate::testutil::npy_bytes(&[3]))]);

        let err = read_episode_stats(&path, SegmentPolicy::Optional)
            .expect_err("missing action must fail");
        assert!(err.to_string().contains(ACTION_MEMBER), "{err}");
    }

    #[test]
    fn unreadable_file_reports_the_path() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("corrupt.npz");
        std::fs::write(&path, b"not an archive").expect("write corrupt file");

        let err =
            read_episode_stats(&path, SegmentPolicy::Optional).expect_err("corrupt must fail");
        assert!(format!("{err:#}").contains("corrupt.npz"), "{err:#}");

        let absent = dir.path().join("absent.npz");
        assert!(read_episode_stats(&absent, SegmentPolicy::Optional).is_err());
    }
}
