use plotix_rs::Engine;

fn main() {
    pretty_env_logger::init();

    let mut engine = Engine::new();
    engine.save_function("f", "x^2");
    engine.save_function("g", "f(x)+1");
    engine.save_function("bell", "1/(1+x^2)");

    println!("saved functions: {:?}", engine.function_names());
    for name in engine.function_names() {
        println!("  {name}(x) = {}", engine.function_body(&name).unwrap());
    }

    println!("f(3)      = {:?}", engine.evaluate_at_zero("f(3)"));
    println!("g(2)      = {:?}", engine.evaluate_at_zero("g(2)"));
    println!("bell(0)   = {:?}", engine.evaluate_at_zero("bell(0)"));
    println!("f((1+2)*3)= {:?}", engine.evaluate_at_zero("f((1+2)*3)"));
    println!("g(f(x)) at x=1: {:?}", engine.evaluate("g(f(x))", 1.0));

    // A self-referential body reports a depth error instead of hanging.
    engine.save_function("h", "h(x)+1");
    println!("h(1)      = {:?}", engine.evaluate_at_zero("h(1)"));
}
