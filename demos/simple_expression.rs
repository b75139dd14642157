use plotix_rs::Engine;

fn main() {
    pretty_env_logger::init();

    let engine = Engine::new();

    let expressions = [
        "2+3*4",
        "(2+3)*4",
        "2^3^2",
        "sin(0)+cos(0)",
        "sqrt(2)/2",
        "5/0",
        "log(0)",
    ];

    for expression in expressions {
        match engine.evaluate_at_zero(expression) {
            Ok(value) => println!("{expression} = {value}"),
            Err(err) => println!("{expression} -> error: {err}"),
        }
    }

    for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
        let value = engine.evaluate("x^2-1", x).unwrap();
        println!("x^2-1 at x={x}: {value}");
    }
}
