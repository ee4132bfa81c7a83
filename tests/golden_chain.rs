mod common;

use common::{hex32, keccak_catalog, tagged_catalog};
use std::sync::Arc;
use std::thread;

use timetravel_miner::mining::{prepare_header, regen_hash};
use timetravel_miner::params::{ANCHOR_TIME, HEADER_LEN};
use timetravel_miner::{chain, AlgoOrder, HashAlgorithm, Ntime, Target, TimeTravel10, Work};

const ZERO_HEADER_IDENTITY: &str = "6c1a6af0eddb4da286dd08e86f50733788283e466429a451f04ca5fefd10a014";

#[test]
fn test_zero_header_at_anchor() {
    let catalog = tagged_catalog();
    let ntime = Ntime::from_hex("58fcf713").unwrap();
    assert_eq!(ntime.value(), ANCHOR_TIME);
    assert_eq!(ntime.order().code(), "0123456789");

    let header = prepare_header(&[0u8; HEADER_LEN], 0);
    let digest = chain(&catalog, &header, &ntime.order()).unwrap();
    assert_eq!(digest, hex32(ZERO_HEADER_IDENTITY));
}

#[test]
fn test_other_orders() {
    let catalog = tagged_catalog();
    let header = [0u8; HEADER_LEN];

    let second = chain(&catalog, &header, &AlgoOrder::from_index(1)).unwrap();
    assert_eq!(
        second,
        hex32("7ac202d25f466372aac217e72068c37453481782d0c5e8d5f3227c97f6766c4f")
    );

    // Default ntime 00000000 lands at index 36205
    let default_order = Ntime::default().order();
    assert_eq!(default_order.code(), "0193476285");
    assert_eq!(
        chain(&catalog, &header, &default_order).unwrap(),
        hex32("e4d72b609f698b7e08caf38f23c71d9965616d46bac437300cd2aedb339080d8")
    );
}

#[test]
fn test_builtin_keccak_slot() {
    let catalog = keccak_catalog();
    let header = [0u8; HEADER_LEN];

    assert_eq!(
        chain(&catalog, &header, &AlgoOrder::IDENTITY).unwrap(),
        hex32("c390005744d530b9a4be3ac43b7fa982a1ae1a67bcab19374ba7f6de94946b86")
    );
    assert_eq!(
        chain(&catalog, &header, &"0198765432".parse().unwrap()).unwrap(),
        hex32("7be62855b5596b03d28450a9b23dc385f0a4276195bfc4280b9855c8c2399883")
    );
}

#[test]
fn test_regen_hash_uses_stored_nonce_and_ntime() {
    let catalog = tagged_catalog();
    let mut data: [u8; HEADER_LEN] = std::array::from_fn(|i| i as u8);
    data[76..].copy_from_slice(&[1, 2, 3, 4]);

    let work = Work::new(data, Target::MAX, Ntime::new(0x5a000000));
    assert_eq!(work.nonce(), 0x0102_0304);
    assert_eq!(
        regen_hash(&catalog, &work).unwrap(),
        hex32("7c1cdc287a354f81c79dbd2a2d1389aefa604145b5d0096afd7079b96399905f")
    );
}

#[test]
fn test_single_perturbation_changes_digest() {
    let catalog = tagged_catalog();
    let base_header = [0u8; HEADER_LEN];
    let base = chain(&catalog, &base_header, &AlgoOrder::IDENTITY).unwrap();

    for position in [0, 1, 37, 75, 76, 79] {
        let mut header = base_header;
        header[position] ^= 0x01;
        let digest = chain(&catalog, &header, &AlgoOrder::IDENTITY).unwrap();
        assert_ne!(digest, base, "flipping byte {} left the digest unchanged", position);
    }

    for code in ["1023456789", "0123456798", "9876543210"] {
        let digest = chain(&catalog, &base_header, &code.parse().unwrap()).unwrap();
        assert_ne!(digest, base, "order {} matched the identity digest", code);
    }
}

#[test]
fn test_chain_is_deterministic_across_threads() {
    let catalog = tagged_catalog();
    let algo = TimeTravel10::new(Arc::clone(&catalog), 0x5a000000);

    let expected: Vec<[u8; 32]> = (0u32..8)
        .map(|nonce| algo.hash(&prepare_header(&[0x5Au8; HEADER_LEN], nonce)).unwrap())
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let algo = algo.clone();
            thread::spawn(move || {
                (0u32..8)
                    .map(|nonce| algo.hash(&prepare_header(&[0x5Au8; HEADER_LEN], nonce)).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
