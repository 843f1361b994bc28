//! Benchmarks for prompt construction and response extraction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use interestminer::analysis::extract::extract_array;
use interestminer::analysis::prompt::build_prompt;
use interestminer::analysis::verdict::clean_analysis;
use interestminer::analysis::{enrich_campaigns, CampaignTotals};

fn create_batch(size: usize) -> Vec<CampaignTotals> {
    (0..size)
        .map(|id| CampaignTotals {
            id: format!("c-{}", id),
            name: format!("Campaign {}", id),
            objective: "OUTCOME_SALES".to_string(),
            spend: 80.0 + id as f64,
            revenue: 200.0 + (id * 2) as f64,
            clicks: 140.0,
            impressions: 8_500.0,
            purchases: 4.0,
            add_to_cart: 18.0,
            initiate_checkout: 9.0,
            add_payment_info: 7.0,
            reach: 6_900.0,
            ctr: 1.6,
            cpm: 9.4,
            cpc: 0.0,
            cpa: 0.0,
            roas: 0.0,
        })
        .collect()
}

fn verdict_payload(size: usize) -> String {
    let entries: Vec<serde_json::Value> = (0..size)
        .map(|i| {
            serde_json::json!({
                "index": i,
                "verdict": "Good Performance",
                "analysis": "ROAS clears the account average with stable funnel conversion.",
                "recommendations": "Raise the daily budget by ten percent and watch frequency."
            })
        })
        .collect();
    serde_json::to_string(&entries).unwrap()
}

fn bench_build_prompt_by_batch_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_prompt");

    for size in [1, 10, 50] {
        let batch = create_batch(size);
        let enriched = enrich_campaigns(&batch, 5_000.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), &enriched, |b, input| {
            b.iter(|| {
                let prompt = build_prompt(black_box(input)).unwrap();
                black_box(prompt)
            });
        });
    }

    group.finish();
}

fn bench_extract_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_array");

    let clean = verdict_payload(20);
    group.bench_function("clean_json", |b| {
        b.iter(|| black_box(extract_array(black_box(&clean))));
    });

    let fenced = format!("```json\n{}\n```", verdict_payload(20));
    group.bench_function("fenced_json", |b| {
        b.iter(|| black_box(extract_array(black_box(&fenced))));
    });

    let chatty = format!(
        "Here is the analysis you asked for:\n{}\nLet me know if you need more.",
        verdict_payload(20)
    );
    group.bench_function("prose_wrapped_json", |b| {
        b.iter(|| black_box(extract_array(black_box(&chatty))));
    });

    group.finish();
}

fn bench_clean_analysis(c: &mut Criterion) {
    let messy = format!("  {}  ", "word ".repeat(120));

    c.bench_function("clean_analysis_oversized", |b| {
        b.iter(|| black_box(clean_analysis(black_box(&messy))));
    });
}

criterion_group!(
    benches,
    bench_build_prompt_by_batch_size,
    bench_extract_array,
    bench_clean_analysis
);
criterion_main!(benches);
