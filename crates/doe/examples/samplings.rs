use ndarray::arr2;
use sweep_doe::{FullFactorial, Lhs, LhsKind, SamplingMethod, Spacing};

fn main() {
    let xlimits = arr2(&[[0.005, 0.75], [0.5, 0.75], [0.001, 0.3]]);
    let n = 4;

    println!("Take {n} samples (or levels) in");
    println!("{xlimits}\n");

    println!("*** using geometric full-factorial sampling");
    let samples = FullFactorial::new(&xlimits)
        .spacing(Spacing::Geometric)
        .sample(n);
    println!("{samples}\n");

    println!("*** using centered latin hypercube sampling");
    let samples = Lhs::new(&xlimits).kind(LhsKind::Centered).sample(n);
    println!("{samples}\n");

    println!("*** using latin hypercube sampling with multi-dimensional uniformity");
    let samples = Lhs::new(&xlimits).sample(n);
    println!("{samples}\n");
}
