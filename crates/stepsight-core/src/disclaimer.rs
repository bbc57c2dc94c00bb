/// Disclaimer printed on every generated report, verbatim.
pub const MEDICAL_DISCLAIMER: &str = "This assessment is intended for informational and educational purposes only \
and is not a substitute for professional medical advice, diagnosis, or treatment. \
Always consult a qualified healthcare provider for medical concerns.";
