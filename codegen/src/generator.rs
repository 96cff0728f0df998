/// One code-generation target. The two implementations (Java and C++)
/// share this flat capability surface and are selected by the caller, one
/// per target source file.
///
/// Both `generate_*` methods are pure functions of the ordered packet-type
/// list; the returned fragments are opaque text inserted verbatim by the
/// splicer. The signature strings are matched literally against trimmed
/// source lines.
pub trait CodeGenerator {
    /// Human-readable target name, used in logs and errors.
    fn target_name(&self) -> &'static str;

    /// Exact declaration line of the generated wrap (encode) method.
    fn wrap_signature(&self) -> &'static str;

    /// Exact declaration line of the generated unwrap (decode) method.
    fn unwrap_signature(&self) -> &'static str;

    /// Body of the wrap method: runtime packet value to wire bytes.
    fn generate_wrap_body(&self, packet_types: &[String]) -> String;

    /// Body of the unwrap method: wire bytes to tagged unwrapped value.
    fn generate_unwrap_body(&self, packet_types: &[String]) -> String;
}
