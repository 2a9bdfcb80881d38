//! Go spelling of primitive kinds.

use restack_ast::{BaseType, MemoryLayout};

/// Maps [`BaseType`] and [`MemoryLayout`] to Go type names.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoTypeMapper;

impl GoTypeMapper {
    pub fn map_primitive(&self, kind: BaseType, memory: MemoryLayout) -> &'static str {
        match (kind, memory) {
            (BaseType::Any, _) => "any",
            (BaseType::Bool, _) => "bool",
            (BaseType::Byte, _) => "byte",
            (BaseType::Rune, _) => "rune",
            (BaseType::String, _) => "string",
            (BaseType::Error, _) => "error",
            (BaseType::Time, _) => "time.Time",
            (BaseType::Integer, MemoryLayout::Native) => "int",
            (BaseType::Integer, MemoryLayout::Bit32) => "int32",
            (BaseType::Integer, MemoryLayout::Bit64) => "int64",
            (BaseType::Decimal, MemoryLayout::Bit32) => "float32",
            (BaseType::Decimal, _) => "float64",
            (BaseType::Complex, MemoryLayout::Bit32) => "complex64",
            (BaseType::Complex, _) => "complex128",
        }
    }

    /// Package a kind needs imported.
    pub fn import_for(&self, kind: BaseType) -> Option<&'static str> {
        match kind {
            BaseType::Time => Some("time"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sized_kinds() {
        let mapper = GoTypeMapper;
        assert_eq!(mapper.map_primitive(BaseType::Integer, MemoryLayout::Native), "int");
        assert_eq!(mapper.map_primitive(BaseType::Integer, MemoryLayout::Bit32), "int32");
        assert_eq!(mapper.map_primitive(BaseType::Decimal, MemoryLayout::Native), "float64");
        assert_eq!(mapper.map_primitive(BaseType::Complex, MemoryLayout::Bit32), "complex64");
    }

    #[test]
    fn test_memory_ignored_for_unsized() {
        let mapper = GoTypeMapper;
        assert_eq!(mapper.map_primitive(BaseType::String, MemoryLayout::Bit64), "string");
        assert_eq!(mapper.map_primitive(BaseType::Time, MemoryLayout::Native), "time.Time");
    }

    #[test]
    fn test_imports() {
        let mapper = GoTypeMapper;
        assert_eq!(mapper.import_for(BaseType::Time), Some("time"));
        assert_eq!(mapper.import_for(BaseType::Error), None);
    }
}
