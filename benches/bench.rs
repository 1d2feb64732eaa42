// Criterion benchmarks for Skill Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use skill_match::core::{build_universe, cosine_similarity, vectorize, Matcher, Normalization};
use skill_match::models::{Candidate, JobLabel, ScoreMap};

const SKILLS: usize = 60;

fn create_job(id: usize) -> Candidate {
    let skills: ScoreMap = (0..SKILLS)
        .filter(|s| (s + id) % 3 != 0)
        .map(|s| (format!("skill_{:02}", s), ((s * 7 + id) % 21) as f64))
        .collect();

    Candidate::new(JobLabel::titled(format!("Job {}", id)), skills)
        .with_required([format!("skill_{:02}", id % SKILLS)])
}

fn create_student() -> ScoreMap {
    (0..SKILLS)
        .step_by(2)
        .map(|s| (format!("skill_{:02}", s), (s % 20) as f64))
        .collect()
}

fn bench_cosine(c: &mut Criterion) {
    let student = create_student();
    let jobs = vec![create_job(1)];
    let universe = build_universe(&student, &jobs);
    let q = vectorize(&student, &universe, None, Normalization::Raw);
    let j = vectorize(&jobs[0].skills, &universe, None, Normalization::Raw);

    c.bench_function("cosine_similarity", |b| {
        b.iter(|| cosine_similarity(black_box(&q), black_box(&j)));
    });
}

fn bench_universe(c: &mut Criterion) {
    let student = create_student();
    let jobs: Vec<Candidate> = (0..100).map(create_job).collect();

    c.bench_function("build_universe_100_jobs", |b| {
        b.iter(|| build_universe(black_box(&student), black_box(&jobs)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::default();
    let student = create_student();

    let mut group = c.benchmark_group("matching");

    for job_count in [10, 50, 100, 500, 1000].iter() {
        let jobs: Vec<Candidate> = (0..*job_count).map(create_job).collect();

        group.bench_with_input(
            BenchmarkId::new("find_matches", job_count),
            job_count,
            |b, _| {
                b.iter(|| {
                    matcher.find_matches(
                        black_box(&student),
                        black_box(jobs.clone()),
                        black_box(Some(20)),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_cosine, bench_universe, bench_matching);

criterion_main!(benches);
