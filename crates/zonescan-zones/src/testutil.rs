//! Synthetic disk images for unit tests

pub const LINUX_FILESYSTEM_GUID: [u8; 16] = [
    0xaf, 0x3d, 0xc6, 0x0f, 0x83, 0x84, 0x72, 0x47,
    0x8e, 0x79, 0x3d, 0x69, 0xd8, 0x47, 0x7d, 0xe4,
];

/// A 512-byte sector holding only the boot signature
pub fn boot_sector() -> Vec<u8> {
    let mut mbr = vec![0u8; 512];
    mbr[0x1FE] = 0x55;
    mbr[0x1FF] = 0xAA;
    mbr
}

/// Fill MBR slot `slot` (1..=4)
pub fn set_mbr_slot(mbr: &mut [u8], slot: usize, status: u8, type_code: u8, start_lba: u32, sectors: u32) {
    let entry = 446 + (slot - 1) * 16;
    mbr[entry] = status;
    mbr[entry + 4] = type_code;
    mbr[entry + 8..entry + 12].copy_from_slice(&start_lba.to_le_bytes());
    mbr[entry + 12..entry + 16].copy_from_slice(&sectors.to_le_bytes());
}

/// One GPT partition entry to place in a synthetic image
pub struct TestEntry {
    pub slot: usize,
    pub type_guid: [u8; 16],
    pub start_lba: u64,
    pub end_lba: u64,
    pub name: Vec<u16>,
}

impl TestEntry {
    pub fn new(slot: usize, start_lba: u64, end_lba: u64, name: &str) -> Self {
        Self {
            slot,
            type_guid: LINUX_FILESYSTEM_GUID,
            start_lba,
            end_lba,
            name: name.encode_utf16().collect(),
        }
    }
}

/// Protective MBR plus a GPT header at LBA 1
pub fn gpt_header_image(table_lba: u64, count: u32, entry_size: u32) -> Vec<u8> {
    let mut disk = boot_sector();
    set_mbr_slot(&mut disk, 1, 0x00, 0xEE, 1, u32::MAX);
    disk.resize(1024, 0);

    let header = 512;
    disk[header..header + 8].copy_from_slice(b"EFI PART");
    disk[header + 8..header + 12].copy_from_slice(&0x0001_0000u32.to_le_bytes());
    disk[header + 12..header + 16].copy_from_slice(&92u32.to_le_bytes());
    disk[header + 24..header + 32].copy_from_slice(&1u64.to_le_bytes());
    disk[header + 32..header + 40].copy_from_slice(&4095u64.to_le_bytes());
    disk[header + 40..header + 48].copy_from_slice(&34u64.to_le_bytes());
    disk[header + 48..header + 56].copy_from_slice(&4062u64.to_le_bytes());
    disk[header + 56..header + 72].copy_from_slice(&[0x11; 16]);
    disk[header + 72..header + 80].copy_from_slice(&table_lba.to_le_bytes());
    disk[header + 80..header + 84].copy_from_slice(&count.to_le_bytes());
    disk[header + 84..header + 88].copy_from_slice(&entry_size.to_le_bytes());
    disk
}

/// Complete GPT image: header plus a zeroed entry array holding `entries`
pub fn gpt_image(table_lba: u64, count: u32, entry_size: u32, entries: &[TestEntry]) -> Vec<u8> {
    let mut disk = gpt_header_image(table_lba, count, entry_size);
    let table = table_lba as usize * 512;
    let end = table + count as usize * entry_size as usize;
    if disk.len() < end {
        disk.resize(end, 0);
    }

    for entry in entries {
        let at = table + entry.slot * entry_size as usize;
        disk[at..at + 16].copy_from_slice(&entry.type_guid);
        disk[at + 16..at + 32].copy_from_slice(&[0x22; 16]);
        disk[at + 32..at + 40].copy_from_slice(&entry.start_lba.to_le_bytes());
        disk[at + 40..at + 48].copy_from_slice(&entry.end_lba.to_le_bytes());
        for (i, unit) in entry.name.iter().enumerate() {
            disk[at + 56 + i * 2..at + 58 + i * 2].copy_from_slice(&unit.to_le_bytes());
        }
    }
    disk
}
