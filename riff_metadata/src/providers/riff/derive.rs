//! Values computed from several header fields at once.

use riff_metadata_types::{value::MetadataValue, video::aspect_ratio_label};

use crate::metadata::MetadataSink;

const BYTES_PER_MIB: f64 = 1_048_576.0;

/// Classifies `width:height` into a common label, like `"16:9"`.
///
/// The ratio is truncated to one decimal place. Ratios without a label are
/// written as that number. Nothing is written when `height` is zero.
pub fn fill_aspect_ratio(width: u32, height: u32, sink: &mut dyn MetadataSink) {
    if height == 0 {
        log::trace!("Frame height is zero. Skipping aspect ratio.");
        return;
    }

    let ratio = (f64::from(width) / f64::from(height) * 10.0).floor() / 10.0;
    let code = (ratio * 10.0 + 0.1) as i32;

    let value = match aspect_ratio_label(code) {
        Some(label) => MetadataValue::from(label),
        None => MetadataValue::Real(ratio),
    };
    sink.set("video.AspectRatio", value);
}

/// Frames per second, given the time between frames in microseconds.
pub fn frame_rate(micro_sec_per_frame: u32) -> Option<f64> {
    (micro_sec_per_frame != 0).then(|| 1_000_000.0 / f64::from(micro_sec_per_frame))
}

/// Writes the duration (in milliseconds) and the overall data rate (in MiB
/// per millisecond).
///
/// Nothing is written for a zero frame rate or a zero duration.
pub fn fill_duration(frame_rate: f64, frame_count: u32, file_len: u64, sink: &mut dyn MetadataSink) {
    if frame_rate <= 0.0 {
        log::trace!("No frame rate. Skipping duration.");
        return;
    }

    let duration = (f64::from(frame_count) * 1000.0 / frame_rate) as u64;
    if duration == 0 {
        log::trace!("Duration rounds to zero. Skipping duration and data rate.");
        return;
    }

    sink.set(
        "video.FileDataRate",
        MetadataValue::Real(file_len as f64 / (BYTES_PER_MIB * duration as f64)),
    );
    sink.set(
        "video.Duration",
        MetadataValue::Integer(i64::try_from(duration).unwrap_or(i64::MAX)),
    );
}

#[cfg(test)]
mod tests {
    use riff_metadata_types::value::MetadataValue;

    use crate::metadata::VideoMetadata;

    use super::{fill_aspect_ratio, fill_duration, frame_rate};

    fn aspect(width: u32, height: u32) -> Option<MetadataValue> {
        let mut meta = VideoMetadata::new();
        fill_aspect_ratio(width, height, &mut meta);
        meta.get("video.AspectRatio").cloned()
    }

    #[test]
    fn common_aspect_ratios() {
        assert_eq!(aspect(1920, 1080), Some("16:9".into()));
        assert_eq!(aspect(640, 480), Some("4:3".into()));
        assert_eq!(aspect(1280, 1024), Some("5:4".into()));
        assert_eq!(aspect(1440, 900), Some("16:10".into()));
        assert_eq!(aspect(500, 500), Some("1:1".into()));
        assert_eq!(aspect(2210, 1000), Some("2.21:1".into()));
        assert_eq!(aspect(2350, 1000), Some("2.35:1".into()));
    }

    #[test]
    fn unusual_aspect_ratio_is_numeric() {
        // 3 / 1 => 3.0
        assert_eq!(aspect(300, 100), Some(MetadataValue::Real(3.0)));
    }

    #[test]
    fn zero_height_writes_nothing() {
        assert_eq!(aspect(640, 0), None);
    }

    #[test]
    fn duration_and_data_rate() {
        let mut meta = VideoMetadata::new();

        // 25 fps, 250 frames => 10 s
        let rate = frame_rate(40_000).unwrap();
        assert_eq!(rate, 25.0);
        fill_duration(rate, 250, 10 * 1_048_576, &mut meta);

        assert_eq!(meta.get("video.Duration"), Some(&MetadataValue::Integer(10_000)));
        assert_eq!(
            meta.get("video.FileDataRate"),
            Some(&MetadataValue::Real(0.001))
        );
    }

    #[test]
    fn zero_duration_writes_nothing() {
        let mut meta = VideoMetadata::new();
        fill_duration(25.0, 0, 1000, &mut meta);
        assert!(meta.is_empty());

        assert_eq!(frame_rate(0), None);
    }
}
