use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trainlog::db::{MemoryStore, TrainingStore, UserStore};
use trainlog::models::{ActivityType, NewTraining, NewUser};

const NUM_USERS: i64 = 100;
const NUM_TRAININGS: usize = 5_000;

/// Seed a population large enough that the filter scans do real work.
fn seeded_store(rt: &tokio::runtime::Runtime) -> MemoryStore {
    let store = MemoryStore::new();
    rt.block_on(async {
        for i in 0..NUM_USERS {
            UserStore::insert(
                &store,
                NewUser {
                    first_name: format!("User{i}"),
                    last_name: "Bench".to_string(),
                    birthdate: chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                    email: format!("user{i}@example.com"),
                },
            )
            .await
            .unwrap();
        }

        let base = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
        for i in 0..NUM_TRAININGS {
            let start = base + Duration::hours(i as i64);
            TrainingStore::insert(
                &store,
                NewTraining {
                    user_id: (i as i64 % NUM_USERS) + 1,
                    start_time: start,
                    end_time: start + Duration::minutes(45),
                    activity_type: ActivityType::ALL[i % ActivityType::ALL.len()],
                    distance: 8.0,
                    average_speed: 10.7,
                },
            )
            .await
            .unwrap();
        }
    });
    store
}

fn benchmark_store_filters(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(&rt);
    // Roughly midway through the seeded timeline.
    let cutoff = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();

    let mut group = c.benchmark_group("store_filters");

    group.bench_function("by_user", |b| {
        b.iter(|| rt.block_on(store.find_all_by_user_id(black_box(7))))
    });

    group.bench_function("by_activity_type", |b| {
        b.iter(|| rt.block_on(store.find_all_by_activity_type(black_box(ActivityType::Running))))
    });

    group.bench_function("finished_after", |b| {
        b.iter(|| rt.block_on(store.find_all_by_end_time_after(black_box(cutoff))))
    });

    group.finish();
}

criterion_group!(benches, benchmark_store_filters);
criterion_main!(benches);
