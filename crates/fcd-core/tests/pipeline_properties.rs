use fcd_core::crypto::{decrypt, derive_key, encrypt, DerivedKey, IV_LENGTH, KEY_LENGTH};
use fcd_core::FcdError;

fn random_key() -> DerivedKey {
    let mut bytes = [0u8; KEY_LENGTH];
    getrandom::getrandom(&mut bytes).expect("os randomness should be available");
    DerivedKey::from_bytes(bytes)
}

fn seal(key: &DerivedKey, plaintext: &[u8]) -> Vec<u8> {
    let mut container = Vec::new();
    encrypt(key, plaintext, &mut container).expect("encryption should succeed");
    container
}

fn open(key: &DerivedKey, container: &[u8]) -> Result<Vec<u8>, FcdError> {
    let mut plaintext = Vec::new();
    decrypt(key, container, &mut plaintext)?;
    Ok(plaintext)
}

#[test]
fn test_round_trip_across_block_boundaries() {
    let key = random_key();
    for len in [0usize, 1, 15, 16, 17, 31, 32, 33, 4095, 4096, 65_537] {
        let plaintext: Vec<u8> = (0..len).map(|i| (i * 31 % 256) as u8).collect();
        let container = seal(&key, &plaintext);
        assert_eq!(
            open(&key, &container).expect("decryption should succeed"),
            plaintext,
            "length {}",
            len
        );
    }
}

#[test]
fn test_wrong_keys_are_rejected() {
    let key = derive_key("alpha bravo charlie", "right");
    let container = seal(&key, b"a modest secret that must not leak under a wrong key");

    let trials = 256;
    let rejected = (0..trials)
        .filter(|_| {
            matches!(
                open(&random_key(), &container),
                Err(FcdError::CompressionFormat { .. })
            )
        })
        .count();

    assert_eq!(rejected, trials);
}

#[test]
fn test_same_plaintext_twice_gives_distinct_containers() {
    let key = random_key();
    let plaintext = b"identical input";

    let containers: Vec<Vec<u8>> = (0..8).map(|_| seal(&key, plaintext)).collect();
    for (i, a) in containers.iter().enumerate() {
        for b in &containers[i + 1..] {
            assert_ne!(a[..IV_LENGTH], b[..IV_LENGTH]);
        }
        assert_eq!(
            open(&key, a).expect("decryption should succeed"),
            plaintext
        );
    }
}

#[test]
fn test_short_containers_never_panic() {
    let key = random_key();
    for len in 0..IV_LENGTH {
        let result = open(&key, &vec![0xEEu8; len]);
        assert!(matches!(result, Err(FcdError::ShortIvRead { .. })));
    }
}

#[test]
fn test_concurrent_pipelines_are_independent() {
    let handles: Vec<_> = (0..4u8)
        .map(|n| {
            std::thread::spawn(move || {
                let key = derive_key("parallel words here", &format!("secret-{}", n));
                let plaintext = vec![n; 100_000];
                let container = seal(&key, &plaintext);
                open(&key, &container).expect("decryption should succeed") == plaintext
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("thread should not panic"));
    }
}
