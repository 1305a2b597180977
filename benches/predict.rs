use criterion::{black_box, criterion_group, criterion_main, Criterion};

use knn_predict::{Dataset, KNNModel, Labels, Predictor};

fn synthetic_rows(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            vec![(t * 0.13).sin() * 10.0, (t * 0.37).cos() * 5.0, t % 17.0]
        })
        .collect()
}

fn bench_train(c: &mut Criterion) {
    let rows = synthetic_rows(500);
    let labels: Vec<f64> = (0..rows.len()).map(|i| (i % 23) as f64).collect();

    c.bench_function("train_500x3", |b| {
        b.iter(|| {
            let data = Dataset::new(black_box(rows.clone())).unwrap();
            KNNModel::train(5, &data, Labels::Numeric(labels.clone())).unwrap()
        })
    });
}

fn bench_predict(c: &mut Criterion) {
    let data = Dataset::new(synthetic_rows(500)).unwrap();
    let labels: Vec<f64> = (0..data.len()).map(|i| (i % 23) as f64).collect();
    let model = KNNModel::train(5, &data, Labels::Numeric(labels)).unwrap();

    c.bench_function("predict_500x3_k5", |b| {
        b.iter(|| model.predict(black_box(&[0.3, -2.0, 4.0])).unwrap())
    });
}

criterion_group!(benches, bench_train, bench_predict);
criterion_main!(benches);
