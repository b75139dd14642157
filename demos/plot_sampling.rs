use plotix_rs::Engine;

// Samples a callback the way the plotting surface does: a dense sweep over
// the visible x-range, with NaN samples treated as gaps in the curve.
fn main() {
    pretty_env_logger::init();

    let mut engine = Engine::new();
    engine.save_function("f", "sqrt(x)*sin(x)");

    let curve = engine.callback("f(x)");

    let (x_min, x_max) = (-2.0, 10.0);
    let samples = 25;

    for i in 0..=samples {
        let x = x_min + (x_max - x_min) * (i as f64) / (samples as f64);
        let y = curve(x);
        if y.is_nan() {
            println!("x = {x:7.3}  (no segment)");
        } else {
            println!("x = {x:7.3}  y = {y:7.3}");
        }
    }
}
