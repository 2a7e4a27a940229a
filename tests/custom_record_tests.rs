use slotfile::region_lock::MemoryLockTable;
use slotfile::{AccessError, FixedRecord, RecordStore, StoreConfig};
use tempfile::tempdir;

/// A 12-byte record: little-endian sequence number and a 4-byte tag.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Sample {
    seq: u64,
    tag: [u8; 4],
}

impl FixedRecord for Sample {
    const SIZE: usize = 12;

    fn encode_into(&self, buf: &mut [u8]) {
        buf[..8].copy_from_slice(&self.seq.to_le_bytes());
        buf[8..].copy_from_slice(&self.tag);
    }

    fn decode(buf: &[u8]) -> Self {
        let mut seq = [0u8; 8];
        seq.copy_from_slice(&buf[..8]);
        let mut tag = [0u8; 4];
        tag.copy_from_slice(&buf[8..12]);
        Self {
            seq: u64::from_le_bytes(seq),
            tag,
        }
    }
}

#[test]
fn test_custom_record_size_sets_slot_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("samples.bin");
    let store: RecordStore<MemoryLockTable, Sample> =
        RecordStore::with_locker(StoreConfig::new(&path), MemoryLockTable::new());

    let sample = Sample {
        seq: 0x0102_0304,
        tag: *b"TEMP",
    };
    store.write_record(2, &sample).unwrap();

    assert_eq!(store.read_record(2).unwrap(), sample);
    assert_eq!(store.slot_region(2).unwrap().offset(), 24);

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 36);
    assert_eq!(&bytes[24..32], &0x0102_0304u64.to_le_bytes());
    assert_eq!(&bytes[32..36], b"TEMP");
}

#[test]
fn test_custom_record_absent_beyond_end() {
    let dir = tempdir().unwrap();
    let store: RecordStore<MemoryLockTable, Sample> = RecordStore::with_locker(
        StoreConfig::new(dir.path().join("samples.bin")),
        MemoryLockTable::new(),
    );

    store
        .write_record(
            0,
            &Sample {
                seq: 1,
                tag: *b"ONE ",
            },
        )
        .unwrap();

    assert!(matches!(
        store.read_record(1),
        Err(AccessError::Absent { index: 1 })
    ));
}
