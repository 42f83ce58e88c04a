//! Memory Buffer Tests.

use schedsim_core::common::SimError;
use schedsim_core::memory::{Memory, copy_block};

#[test]
fn write_then_read() {
    let mut mem = Memory::physical(8);
    mem.write(3, 0xAB).unwrap();
    assert_eq!(mem.read(3), Ok(0xAB));
    assert_eq!(mem.read(4), Ok(4));
}

#[test]
fn last_byte_is_in_bounds() {
    let mem = Memory::storage(8);
    assert_eq!(mem.read(7), Ok(7));
    assert_eq!(
        mem.read(8),
        Err(SimError::OutOfBounds {
            region: "storage",
            address: 8,
            size: 8,
        })
    );
}

#[test]
fn slice_crossing_end_is_rejected() {
    let mut mem = Memory::physical(8);
    assert!(mem.read_slice(6, 2).is_ok());
    assert!(mem.read_slice(6, 3).is_err());
    assert!(mem.write_slice(7, &[1, 2]).is_err());
    assert_eq!(mem.read(7), Ok(7));
}

#[test]
fn copy_block_moves_one_frame() {
    let storage = Memory::storage(32);
    let mut physical = Memory::physical(16);
    copy_block(&storage, &mut physical, 20, 2, 2).unwrap();
    assert_eq!(&physical.as_slice()[..4], &[0, 1, 20, 21]);
}

#[test]
fn copy_block_out_of_range_source() {
    let storage = Memory::storage(4);
    let mut physical = Memory::physical(16);
    let err = copy_block(&storage, &mut physical, 3, 0, 2).unwrap_err();
    assert!(matches!(err, SimError::OutOfBounds { region: "storage", .. }));
}
