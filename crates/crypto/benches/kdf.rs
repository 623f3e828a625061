use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use passkdf_crypto::kdf::{
    HashAlgorithm, PasswordBasedKDF,
    scrypt::{
        ScryptSettings,
        backends::{parallel::ParallelScrypt, sequential::SequentialScrypt},
    },
};

fn bench_scrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("scrypt");

    for log_n in [10, 14, 16] {
        for r in [1, 4, 8] {
            for p in [1, 4] {
                if log_n == 16 && r == 1 {
                    // scrypt has a requirement: n < 2^(128 * r / 8)
                    continue;
                }
                let settings = ScryptSettings {
                    log_n,
                    r,
                    p,
                    salt_len: 16,
                    hash: HashAlgorithm::Sha256,
                };
                group.bench_with_input(
                    BenchmarkId::new("scrypt-sequential", format!("{settings:?}")),
                    &settings,
                    |b, settings| {
                        let params = SequentialScrypt::generate_parameters(settings).unwrap();
                        b.iter(|| black_box(SequentialScrypt::derive_key(64, b"password", &params)));
                    },
                );
                group.bench_with_input(
                    BenchmarkId::new("scrypt-parallel", format!("{settings:?}")),
                    &settings,
                    |b, settings| {
                        let params = ParallelScrypt::generate_parameters(settings).unwrap();
                        b.iter(|| black_box(ParallelScrypt::derive_key(64, b"password", &params)));
                    },
                );
            }
        }
    }
}

fn bench_hash_algorithm(c: &mut Criterion) {
    let mut group = c.benchmark_group("scrypt-hash");

    for hash in HashAlgorithm::ALL {
        let settings = ScryptSettings {
            hash,
            ..ScryptSettings::DEFAULT
        };
        group.bench_with_input(BenchmarkId::from_parameter(hash), &settings, |b, settings| {
            let params = ParallelScrypt::generate_parameters(settings).unwrap();
            b.iter(|| black_box(ParallelScrypt::derive_key(64, b"password", &params)));
        });
    }
}

criterion_group!(benches, bench_scrypt, bench_hash_algorithm);
criterion_main!(benches);
