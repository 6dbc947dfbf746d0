//! Stable identifiers for rules and result codes.
//!
//! `rule_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Rules: memory
pub const RULE_MEMORY_INITIAL_SIZE: &str = "memory.initial_size";
pub const RULE_MEMORY_INITIAL_SIZE_RANGE: &str = "memory.initial_size_range";
pub const RULE_MEMORY_GROWTH_MODE: &str = "memory.growth_mode";
pub const RULE_MEMORY_LINEAR_STEP: &str = "memory.linear_step";
pub const RULE_MEMORY_GEOMETRIC_STEP: &str = "memory.geometric_step";
pub const RULE_MEMORY_GEOMETRIC_CAP: &str = "memory.geometric_cap";

// Rules: texture streaming
pub const RULE_MIPMAPS_ACTIVE: &str = "mipmaps.active";
pub const RULE_MIPMAPS_ADD_ALL_CAMERAS: &str = "mipmaps.add_all_cameras";
pub const RULE_MIPMAPS_MEMORY_BUDGET: &str = "mipmaps.memory_budget";
pub const RULE_MIPMAPS_BUDGET_WITHIN_MEMORY: &str = "mipmaps.budget_within_memory";
pub const RULE_MIPMAPS_MAX_LEVEL_REDUCTION: &str = "mipmaps.max_level_reduction";

// Rules: quality preset
pub const RULE_QUALITY_PRESET_PRESENT: &str = "quality.preset_present";
pub const RULE_QUALITY_PIXEL_LIGHT_COUNT: &str = "quality.pixel_light_count";
pub const RULE_QUALITY_SHADOWS: &str = "quality.shadows";
pub const RULE_QUALITY_SHADOW_RESOLUTION: &str = "quality.shadow_resolution";
pub const RULE_QUALITY_ANTI_ALIASING: &str = "quality.anti_aliasing";
pub const RULE_QUALITY_ASYNC_UPLOAD_BUFFER: &str = "quality.async_upload_buffer_size";
pub const RULE_QUALITY_ASYNC_UPLOAD_TIME_SLICE: &str = "quality.async_upload_time_slice";
pub const RULE_QUALITY_PARTICLE_RAYCAST_BUDGET: &str = "quality.particle_raycast_budget";
pub const RULE_QUALITY_STREAMING_MIPMAPS: &str = "quality.streaming_mipmaps";

// Rules: build script
pub const RULE_BUILD_PRODUCTION_ENTRY: &str = "build.production_entry";
pub const RULE_BUILD_DEBUG_ENTRY: &str = "build.debug_entry";
pub const RULE_BUILD_EXCEPTION_SUPPORT: &str = "build.exception_support";
pub const RULE_BUILD_COMPRESSION: &str = "build.compression_gzip";
pub const RULE_BUILD_DECOMPRESSION_FALLBACK: &str = "build.decompression_fallback";
pub const RULE_BUILD_LINKER_TARGET: &str = "build.linker_wasm";
pub const RULE_BUILD_DATA_CACHING: &str = "build.data_caching";

// Rules: resource cleanup coroutine
pub const RULE_CLEANUP_COROUTINE: &str = "cleanup.coroutine_defined";
pub const RULE_CLEANUP_INTERVAL: &str = "cleanup.interval_60s";
pub const RULE_CLEANUP_UNLOAD_ASSETS: &str = "cleanup.unload_unused_assets";
pub const RULE_CLEANUP_GC_COLLECT: &str = "cleanup.gc_collect";
pub const RULE_CLEANUP_WEBGL_ONLY: &str = "cleanup.webgl_only";
pub const RULE_CLEANUP_AUTO_START: &str = "cleanup.auto_start";

// Codes: rule outcomes
pub const CODE_MISSING_KEY: &str = "missing_key";
pub const CODE_TYPE_MISMATCH: &str = "type_mismatch";
pub const CODE_VIOLATION: &str = "violation";

// Tool-level
pub const RULE_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";

// Well-known source names used by preset rules.
pub const SOURCE_BUILDER: &str = "builder";
pub const SOURCE_CLEANUP: &str = "cleanup";

/// Name of the quality level the preset rules expect to exist.
pub const QUALITY_PRESET_WEBGL: &str = "WebGL-Optimized";
