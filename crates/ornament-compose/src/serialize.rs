/// (De)Serialize a [f64] rounded to 3 decimal places
pub mod f64_dp3 {
    use serde::{Deserialize, Serialize};
    use serde::{Deserializer, Serializer};

    /// Serialize a [f64] rounded to 3 decimal places
    pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
        const D: f64 = (10_u32.pow(3)) as f64;
        ((v * D).round() / D).serialize(s)
    }

    /// Deserialize a [f64]
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        f64::deserialize(d)
    }
}
