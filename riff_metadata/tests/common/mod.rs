//! Byte builders for synthetic RIFF files.

#![allow(dead_code)]

pub fn logger() {
    _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::max())
        .format_file(true)
        .format_line_number(true)
        .try_init();
}

/// One chunk, padded to an even length.
pub fn chunk(fourcc: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut bytes = fourcc.to_vec();
    bytes.extend((data.len() as u32).to_le_bytes());
    bytes.extend_from_slice(data);
    if data.len() % 2 != 0 {
        bytes.push(0_u8);
    }
    bytes
}

/// A `LIST` of `children`.
pub fn list(list_type: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    let mut body = list_type.to_vec();
    children.iter().for_each(|c| body.extend_from_slice(c));
    chunk(b"LIST", &body)
}

/// A whole file: the `RIFF` header followed by `chunks`.
pub fn make_riff_sample(form_type: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = b"RIFF".to_vec();
    bytes.extend([0; 4]); // we'll fill this in just a sec
    bytes.extend_from_slice(form_type);
    chunks.iter().for_each(|c| bytes.extend_from_slice(c));

    let size = (bytes.len() as u32) - 8;
    bytes[4..8].copy_from_slice(&size.to_le_bytes());
    bytes
}

fn u32s(fields: &[u32]) -> Vec<u8> {
    fields.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// A 56-byte `avih` payload.
pub fn avih(micro_sec_per_frame: u32, frames: u32, streams: u32, width: u32, height: u32) -> Vec<u8> {
    u32s(&[
        micro_sec_per_frame,
        1_024_000,
        0,
        0x10,
        frames,
        0,
        streams,
        1_048_576,
        width,
        height,
        0,
        0,
        0,
        0,
    ])
}

/// A 56-byte `strh` payload.
pub fn strh(fcc_type: &[u8; 4], handler: &[u8; 4], scale: u32, rate: u32, length: u32) -> Vec<u8> {
    let mut bytes = fcc_type.to_vec();
    bytes.extend_from_slice(handler);
    bytes.extend(u32s(&[0, 0, 0, scale, rate, 0, length, 0, 10_000, 0]));
    bytes.extend([0; 8]); // rcFrame
    bytes
}

/// A 40-byte `BITMAPINFOHEADER`.
pub fn bitmap_info(width: u32, height: u32, compression: &[u8; 4]) -> Vec<u8> {
    let mut bytes = u32s(&[40, width, height]);
    bytes.extend(1_u16.to_le_bytes());
    bytes.extend(24_u16.to_le_bytes());
    bytes.extend_from_slice(compression);
    bytes.extend(u32s(&[width * height * 3, 0, 0, 0, 0]));
    bytes
}

/// An 18-byte `WAVEFORMATEX`.
pub fn wave_format_ex(tag: u16, channels: u16, rate: u32, bits: u16) -> Vec<u8> {
    let block_align = channels * bits / 8;
    let mut bytes = Vec::new();
    bytes.extend(tag.to_le_bytes());
    bytes.extend(channels.to_le_bytes());
    bytes.extend(rate.to_le_bytes());
    bytes.extend((rate * u32::from(block_align)).to_le_bytes());
    bytes.extend(block_align.to_le_bytes());
    bytes.extend(bits.to_le_bytes());
    bytes.extend(0_u16.to_le_bytes()); // cbSize
    bytes
}

/// A Pentax record, as found in the `JUNK` after the header list.
pub fn pentax_junk() -> Vec<u8> {
    fn put(buf: &mut [u8], offset: usize, bytes: &[u8]) {
        buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    let mut buf = vec![0_u8; 4096];
    put(&mut buf, 0, b"PENTDigital Camera");
    put(&mut buf, 18, b"PENTAX");
    put(&mut buf, 44, b"PENTAX Optio WG-1");
    put(&mut buf, 94, &56_i32.to_le_bytes());
    put(&mut buf, 98, &10_i32.to_le_bytes());
    put(&mut buf, 131, b"2011:07:01 09:30:00");
    put(&mut buf, 157, b"2011:07:01 09:30:00");
    put(&mut buf, 299, &160_u16.to_le_bytes());
    put(&mut buf, 301, &120_u16.to_le_bytes());
    buf
}

/// Nikon's `{u16 tag, u16 len, bytes}` record.
pub fn nikon_record(tag: u16, data: &[u8]) -> Vec<u8> {
    let mut bytes = tag.to_le_bytes().to_vec();
    bytes.extend((data.len() as u16).to_le_bytes());
    bytes.extend_from_slice(data);
    bytes
}

/// A small but complete AVI: two streams, an OpenDML header, a Pentax
/// record, an `INFO` list, and some media data.
pub fn sample_avi() -> Vec<u8> {
    let video_strl = list(
        b"strl",
        &[
            chunk(b"strh", &strh(b"vids", b"XVID", 1, 25, 250)),
            chunk(b"strf", &bitmap_info(640, 480, b"XVID")),
            chunk(b"strn", b"Video\0"),
        ],
    );
    let audio_strl = list(
        b"strl",
        &[
            chunk(b"strh", &strh(b"auds", &[0; 4], 1, 44_100, 441_000)),
            chunk(b"strf", &wave_format_ex(0x0055, 2, 44_100, 16)),
        ],
    );
    let mut dmlh = 250_u32.to_le_bytes().to_vec();
    dmlh.extend([0; 244]);

    let hdrl = list(
        b"hdrl",
        &[
            chunk(b"avih", &avih(40_000, 250, 2, 640, 480)),
            video_strl,
            audio_strl,
            list(b"odml", &[chunk(b"dmlh", &dmlh)]),
        ],
    );

    make_riff_sample(
        b"AVI ",
        &[
            hdrl,
            chunk(b"JUNK", &pentax_junk()),
            list(
                b"INFO",
                &[chunk(b"INAM", b"Lake\0"), chunk(b"ISFT", b"PENTAX\0")],
            ),
            list(b"movi", &[chunk(b"00dc", &[0xAB; 64]), chunk(b"01wb", &[0xCD; 32])]),
            chunk(b"idx1", &[0; 32]),
        ],
    )
}
