use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use represent::accept;
use represent::protocol::{register_builtins, CodecError, Protocol};
use represent::registry::Registry;
use represent::runtime_config::RegistryConfig;
use serde_json::Value;
use std::hint::black_box;
use std::io::{Read, Write};
use std::sync::Arc;
use std::thread;

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

struct Named(String);

impl Protocol for Named {
    fn content_type(&self) -> &str {
        &self.0
    }
    fn decode(&self, _source: &mut dyn Read) -> Result<Value, CodecError> {
        Ok(Value::Null)
    }
    fn encode(&self, _value: &Value, _sink: &mut dyn Write) -> Result<(), CodecError> {
        Ok(())
    }
}

fn registry_of(size: usize, config: RegistryConfig) -> Registry {
    let registry = Registry::with_config(config);
    register_builtins(&registry);
    for i in 0..size {
        registry.register(Arc::new(Named(format!("application/x-vendor-{i}"))));
    }
    registry
}

/// Parsing alone, no cache
fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_browser_accept", |b| {
        b.iter(|| accept::parse(black_box(BROWSER_ACCEPT)))
    });
}

/// Cached vs uncached match as the registry grows
fn bench_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_header");

    for size in [0, 10, 100].iter() {
        let cached = registry_of(*size, RegistryConfig::default());
        group.bench_with_input(BenchmarkId::new("cached", size), size, |b, _| {
            b.iter(|| cached.match_header(black_box(BROWSER_ACCEPT)))
        });

        let uncached = registry_of(
            *size,
            RegistryConfig {
                spec_cache_enabled: false,
                ..RegistryConfig::default()
            },
        );
        group.bench_with_input(BenchmarkId::new("uncached", size), size, |b, _| {
            b.iter(|| uncached.match_header(black_box(BROWSER_ACCEPT)))
        });
    }

    group.finish();
}

/// Many readers hitting the same registry
fn bench_concurrent_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_match");
    group.sample_size(10);

    for num_threads in [2, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("same_header", num_threads),
            num_threads,
            |b, &num_threads| {
                let registry = Arc::new(registry_of(10, RegistryConfig::default()));
                b.iter(|| {
                    let handles: Vec<_> = (0..num_threads)
                        .map(|_| {
                            let registry = Arc::clone(&registry);
                            thread::spawn(move || {
                                for _ in 0..1000 {
                                    black_box(registry.match_header(BROWSER_ACCEPT).is_ok());
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_match, bench_concurrent_match);
criterion_main!(benches);
