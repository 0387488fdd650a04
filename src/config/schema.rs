//! The enumeration contract between an application and its config table

/// Type tag for parameters stored as signed 32-bit integers.
pub const TYPE_INT: &str = "int";

/// Type tag for parameters stored as bounded strings.
pub const TYPE_STR: &str = "str";

/// Prefix prepended to every parameter name to form its JSON query key.
pub const KEY_PREFIX: &str = "config.";

/// Maximum number of parameters a schema may define.
pub const MAX_PARAMS: usize = 32;

/// Storage bound for one string parameter, terminator included.
pub const MAX_STR_LEN: usize = 64;

/// A compile-time description of an application's configuration parameters.
///
/// Ids form a contiguous range: `start()` is a reserved id that never names
/// a parameter (conventionally 0) and `end()` is one past the last real id,
/// so the parameters are `start() + 1 .. end()`. Implementations are
/// typically a unit struct matching on a parameter enum.
pub trait ConfigSchema {
    /// Reserved identifier preceding the first parameter.
    fn start(&self) -> u16;

    /// One past the last parameter identifier.
    fn end(&self) -> u16;

    /// The parameter's name, without the query-key prefix.
    fn name(&self, id: u16) -> &str;

    /// The parameter's type tag, [`TYPE_INT`] or [`TYPE_STR`].
    fn type_tag(&self, id: u16) -> &str;

    /// Number of real parameters the schema defines.
    fn param_count(&self) -> usize {
        usize::from(self.end().saturating_sub(self.start() + 1))
    }
}
