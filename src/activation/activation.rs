/// Hyperbolic tangent, the single activation compiled into the network.
pub struct Tanh;

impl Tanh {
    pub fn function(x: f64) -> f64 {
        x.tanh()
    }

    /// d/dx tanh(x) = 1 / cosh²(x)
    pub fn derivative(x: f64) -> f64 {
        let c = x.cosh();
        1.0 / (c * c)
    }
}
