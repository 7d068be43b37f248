use criterion::{black_box, criterion_group, criterion_main, Criterion};
use steepest::{
    algo::steepest_descent::{SteepestDescent, SteepestDescentOptions},
    nalgebra as na,
    objective::{ObjectiveKind, Quadratic, Rosenbrock},
    testing::*,
    Function, Optimizer, OptimizerDriver, Problem,
};

const MAX_ITERS: usize = 1_000;
const TOLERANCE: f64 = 1e-4;

fn descend<F, O>(f: &F, mut optimizer: O, mut x: na::DVector<f64>) -> f64
where
    F: TestFunction,
    O: Optimizer<F>,
{
    let dom = f.domain(x.nrows());
    let mut magnitude = f64::INFINITY;

    if optimizer.opt_start(f, &dom, &mut x).is_err() {
        return magnitude;
    }

    for _ in 0..MAX_ITERS {
        match optimizer.opt_next(f, &dom, &mut x) {
            Ok(current) if current > TOLERANCE => magnitude = current,
            Ok(current) => return current,
            Err(_) => break,
        }
    }

    magnitude
}

fn steepest_descent<F: Function>(f: &F, dim: usize, step_size: f64) -> SteepestDescent {
    let mut options = SteepestDescentOptions::default();
    options.set_step_size(step_size);
    SteepestDescent::with_options(f, &f.domain(dim), options)
}

fn quadratic(c: &mut Criterion) {
    let f = Quadratic;
    let x = &f.initials(10)[1];

    c.bench_function("steepest descent quadratic", |b| {
        b.iter(|| black_box(descend(&f, steepest_descent(&f, 10, 0.25), x.clone_owned())))
    });
}

fn rosenbrock(c: &mut Criterion) {
    let f = Rosenbrock::new();
    let x = &f.initials(2)[0];

    c.bench_function("steepest descent rosenbrock", |b| {
        b.iter(|| black_box(descend(&f, steepest_descent(&f, 2, 0.001), x.clone_owned())))
    });
}

fn rosenbrock_bonus(c: &mut Criterion) {
    let f = Rosenbrock::bonus();
    let x = &f.initials(4)[0];

    c.bench_function("steepest descent rosenbrock bonus", |b| {
        b.iter(|| black_box(descend(&f, steepest_descent(&f, 4, 0.0005), x.clone_owned())))
    });
}

fn rosenbrock_large(c: &mut Criterion) {
    let f = Rosenbrock::new();
    let x = &f.initials(200)[1];

    c.bench_function("steepest descent rosenbrock large", |b| {
        b.iter(|| black_box(descend(&f, steepest_descent(&f, 200, 0.001), x.clone_owned())))
    });
}

fn driver_trace(c: &mut Criterion) {
    let f = ObjectiveKind::Rosenbrock;
    let x0 = f.initials(3)[0].as_slice().to_vec();

    c.bench_function("driver trace rosenbrock", |b| {
        b.iter(|| {
            let mut optimizer = OptimizerDriver::builder(&f)
                .with_initial(x0.clone())
                .with_max_iters(MAX_ITERS)
                .with_tolerance(TOLERANCE)
                .build();
            black_box(optimizer.run().map(|outcome| outcome.trace().len()))
        })
    });
}

criterion_group!(
    descent,
    quadratic,
    rosenbrock,
    rosenbrock_bonus,
    rosenbrock_large,
    driver_trace
);
criterion_main!(descent);
