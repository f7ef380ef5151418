use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tzengine::common::scalar::{EpochSeconds, Offset};
use tzengine::date_tuple::{DateTuple, Suffix};
use tzengine::epoch::EpochConfig;
use tzengine::tz::find::Disambiguate;
use tzengine::tz::processor::ZoneProcessor;
use tzengine::tz::zonedb;

fn bench_days_from_ymd(c: &mut Criterion) {
    let cfg = EpochConfig::default();
    c.bench_function("days_from_ymd", |b| {
        b.iter(|| black_box(cfg.days_from_ymd(black_box(2022), black_box(11), black_box(6))))
    });
}

fn bench_find_by_epoch_seconds(c: &mut Criterion) {
    let mut proc = ZoneProcessor::new();
    let es = EpochSeconds::new(proc.epoch_config().epoch_seconds_from_unix_seconds(1_656_633_600));
    c.bench_function("find_by_epoch_seconds", |b| {
        b.iter(|| black_box(proc.find_by_epoch_seconds(black_box(zonedb::LOS_ANGELES), es).unwrap()))
    });
}

fn bench_find_by_local_date_time(c: &mut Criterion) {
    let mut proc = ZoneProcessor::new();
    let target = DateTuple::new(2022, 7, 1, 12 * 3600, Suffix::Wall);
    c.bench_function("find_by_local_date_time", |b| {
        b.iter(|| {
            black_box(
                proc.find_by_local_date_time(black_box(zonedb::LOS_ANGELES), &target, Disambiguate::Compatible)
                    .unwrap(),
            )
        })
    });
}

fn bench_offset_display(c: &mut Criterion) {
    let offset = Offset::new_unchecked(-8 * 3600);
    c.bench_function("offset_display", |b| b.iter(|| black_box(offset).to_string()));
}

criterion_group!(
    benches,
    bench_days_from_ymd,
    bench_find_by_epoch_seconds,
    bench_find_by_local_date_time,
    bench_offset_display
);
criterion_main!(benches);
