use std::collections::BTreeMap;
use webglguard_domain::model::SettingValue;
use webglguard_domain::policy::{Predicate, Rule};
use webglguard_types::ids::*;

const PRODUCTION_EXCEPTIONS: &str = "WebGLExceptionSupport.ExplicitlyThrownExceptionsOnly";
const DEBUG_EXCEPTIONS: &str = "WebGLExceptionSupport.FullWithoutStackTrace";

/// Preset profiles are opinionated defaults for browser builds.
///
/// Returns the canonical profile name and its rules. Unknown names fall back to `production`.
pub fn preset(profile: &str) -> (&'static str, Vec<Rule>) {
    match profile {
        "debug" => ("debug", rules_with_exceptions(DEBUG_EXCEPTIONS)),
        // default
        _ => ("production", rules_with_exceptions(PRODUCTION_EXCEPTIONS)),
    }
}

/// Every rule id a preset can contribute, in evaluation order.
pub fn preset_rule_ids() -> Vec<&'static str> {
    vec![
        RULE_MEMORY_INITIAL_SIZE,
        RULE_MEMORY_INITIAL_SIZE_RANGE,
        RULE_MEMORY_GROWTH_MODE,
        RULE_MEMORY_LINEAR_STEP,
        RULE_MEMORY_GEOMETRIC_STEP,
        RULE_MEMORY_GEOMETRIC_CAP,
        RULE_MIPMAPS_ACTIVE,
        RULE_MIPMAPS_ADD_ALL_CAMERAS,
        RULE_MIPMAPS_MEMORY_BUDGET,
        RULE_MIPMAPS_BUDGET_WITHIN_MEMORY,
        RULE_MIPMAPS_MAX_LEVEL_REDUCTION,
        RULE_QUALITY_PRESET_PRESENT,
        RULE_QUALITY_PIXEL_LIGHT_COUNT,
        RULE_QUALITY_SHADOWS,
        RULE_QUALITY_SHADOW_RESOLUTION,
        RULE_QUALITY_ANTI_ALIASING,
        RULE_QUALITY_ASYNC_UPLOAD_BUFFER,
        RULE_QUALITY_ASYNC_UPLOAD_TIME_SLICE,
        RULE_QUALITY_PARTICLE_RAYCAST_BUDGET,
        RULE_QUALITY_STREAMING_MIPMAPS,
        RULE_BUILD_PRODUCTION_ENTRY,
        RULE_BUILD_DEBUG_ENTRY,
        RULE_BUILD_EXCEPTION_SUPPORT,
        RULE_BUILD_COMPRESSION,
        RULE_BUILD_DECOMPRESSION_FALLBACK,
        RULE_BUILD_LINKER_TARGET,
        RULE_BUILD_DATA_CACHING,
        RULE_CLEANUP_COROUTINE,
        RULE_CLEANUP_INTERVAL,
        RULE_CLEANUP_UNLOAD_ASSETS,
        RULE_CLEANUP_GC_COLLECT,
        RULE_CLEANUP_WEBGL_ONLY,
        RULE_CLEANUP_AUTO_START,
    ]
}

/// Where the preset source rules look when the config does not say otherwise.
pub fn default_sources() -> BTreeMap<String, String> {
    let mut m = BTreeMap::new();
    m.insert(SOURCE_BUILDER.to_string(), "Assets/Build/Builder.cs".to_string());
    m.insert(
        SOURCE_CLEANUP.to_string(),
        "Assets/**/ResourceManager.cs".to_string(),
    );
    m
}

fn int(v: i64) -> Predicate {
    Predicate::Equals(SettingValue::Int(v))
}

fn quality_key(key: &str) -> String {
    format!("quality.{QUALITY_PRESET_WEBGL}.{key}")
}

fn rules_with_exceptions(exception_support: &str) -> Vec<Rule> {
    let q = quality_key;
    vec![
        // Player memory
        Rule::setting(
            RULE_MEMORY_INITIAL_SIZE,
            "initial memory size is 64 MB",
            "webGLMemorySize",
            int(64),
        ),
        Rule::setting(
            RULE_MEMORY_INITIAL_SIZE_RANGE,
            "initial memory size within [32, 4096) MB",
            "webGLMemorySize",
            Predicate::Range {
                low: 32.0,
                high: 4096.0,
                low_inclusive: true,
                high_inclusive: false,
            },
        ),
        Rule::setting(
            RULE_MEMORY_GROWTH_MODE,
            "memory growth mode enabled",
            "webGLMemoryGrowthMode",
            int(1),
        ),
        Rule::setting(
            RULE_MEMORY_LINEAR_STEP,
            "linear growth step is 32 MB",
            "webGLMemoryGrowthStep",
            int(32),
        ),
        Rule::setting(
            RULE_MEMORY_GEOMETRIC_STEP,
            "geometric growth step is 0.15",
            "webGLMemoryGeometricStep",
            Predicate::Approx {
                expected: 0.15,
                tolerance: 0.01,
            },
        ),
        Rule::setting(
            RULE_MEMORY_GEOMETRIC_CAP,
            "geometric growth cap is 128 MB",
            "webGLMemoryGeometricCap",
            int(128),
        ),
        // Texture streaming
        Rule::setting(
            RULE_MIPMAPS_ACTIVE,
            "streaming mipmaps enabled",
            "streamingMipmapsActive",
            Predicate::Truthy,
        ),
        Rule::setting(
            RULE_MIPMAPS_ADD_ALL_CAMERAS,
            "streaming mipmaps add all cameras",
            "streamingMipmapsAddAllCameras",
            Predicate::Truthy,
        ),
        Rule::setting(
            RULE_MIPMAPS_MEMORY_BUDGET,
            "streaming mipmaps memory budget is 256 MB",
            "streamingMipmapsMemoryBudget",
            int(256),
        ),
        Rule::setting(
            RULE_MIPMAPS_BUDGET_WITHIN_MEMORY,
            "mipmap budget between initial (64 MB) and maximum (2048 MB) memory",
            "streamingMipmapsMemoryBudget",
            Predicate::range_exclusive(64.0, 2048.0),
        ),
        Rule::setting(
            RULE_MIPMAPS_MAX_LEVEL_REDUCTION,
            "streaming mipmaps max level reduction is 3",
            "streamingMipmapsMaxLevelReduction",
            int(3),
        ),
        // WebGL-Optimized quality level
        Rule::setting(
            RULE_QUALITY_PRESET_PRESENT,
            "quality level WebGL-Optimized exists",
            &q("name"),
            Predicate::Equals(SettingValue::Text(QUALITY_PRESET_WEBGL.to_string())),
        ),
        Rule::setting(
            RULE_QUALITY_PIXEL_LIGHT_COUNT,
            "WebGL-Optimized pixel light count is 1",
            &q("pixelLightCount"),
            int(1),
        ),
        Rule::setting(
            RULE_QUALITY_SHADOWS,
            "WebGL-Optimized shadows are hard-only",
            &q("shadows"),
            int(1),
        ),
        Rule::setting(
            RULE_QUALITY_SHADOW_RESOLUTION,
            "WebGL-Optimized shadow resolution is low",
            &q("shadowResolution"),
            int(0),
        ),
        Rule::setting(
            RULE_QUALITY_ANTI_ALIASING,
            "WebGL-Optimized anti-aliasing disabled",
            &q("antiAliasing"),
            int(0),
        ),
        Rule::setting(
            RULE_QUALITY_ASYNC_UPLOAD_BUFFER,
            "WebGL-Optimized async upload buffer is 8 MB",
            &q("asyncUploadBufferSize"),
            int(8),
        ),
        Rule::setting(
            RULE_QUALITY_ASYNC_UPLOAD_TIME_SLICE,
            "WebGL-Optimized async upload time slice is 2 ms",
            &q("asyncUploadTimeSlice"),
            int(2),
        ),
        Rule::setting(
            RULE_QUALITY_PARTICLE_RAYCAST_BUDGET,
            "WebGL-Optimized particle raycast budget is 64",
            &q("particleRaycastBudget"),
            int(64),
        ),
        Rule::setting(
            RULE_QUALITY_STREAMING_MIPMAPS,
            "WebGL-Optimized streams mipmaps",
            &q("streamingMipmapsActive"),
            Predicate::Truthy,
        ),
        // Build script
        Rule::source(
            RULE_BUILD_PRODUCTION_ENTRY,
            "build script defines BuildProduction",
            SOURCE_BUILDER,
            "BuildProduction",
        ),
        Rule::source(
            RULE_BUILD_DEBUG_ENTRY,
            "build script defines BuildDebug",
            SOURCE_BUILDER,
            "BuildDebug",
        ),
        Rule::source(
            RULE_BUILD_EXCEPTION_SUPPORT,
            &format!("build script sets exception support to {exception_support}"),
            SOURCE_BUILDER,
            exception_support,
        ),
        Rule::source(
            RULE_BUILD_COMPRESSION,
            "build script uses Gzip compression",
            SOURCE_BUILDER,
            "WebGLCompressionFormat.Gzip",
        ),
        Rule::source(
            RULE_BUILD_DECOMPRESSION_FALLBACK,
            "build script enables decompression fallback",
            SOURCE_BUILDER,
            "decompressionFallback = true",
        ),
        Rule::source(
            RULE_BUILD_LINKER_TARGET,
            "build script links to Wasm",
            SOURCE_BUILDER,
            "WebGLLinkerTarget.Wasm",
        ),
        Rule::source(
            RULE_BUILD_DATA_CACHING,
            "build script enables data caching",
            SOURCE_BUILDER,
            "dataCaching = true",
        ),
        // Resource cleanup
        Rule::source(
            RULE_CLEANUP_COROUTINE,
            "cleanup coroutine is defined",
            SOURCE_CLEANUP,
            "ResourceCleanupCoroutine",
        ),
        Rule::source(
            RULE_CLEANUP_INTERVAL,
            "cleanup runs every 60 seconds",
            SOURCE_CLEANUP,
            "WaitForSeconds(60f)",
        ),
        Rule::source(
            RULE_CLEANUP_UNLOAD_ASSETS,
            "cleanup unloads unused assets",
            SOURCE_CLEANUP,
            "Resources.UnloadUnusedAssets()",
        ),
        Rule::source(
            RULE_CLEANUP_GC_COLLECT,
            "cleanup collects garbage",
            SOURCE_CLEANUP,
            "System.GC.Collect()",
        ),
        Rule::source(
            RULE_CLEANUP_WEBGL_ONLY,
            "cleanup is compiled for WebGL players only",
            SOURCE_CLEANUP,
            "UNITY_WEBGL && !UNITY_EDITOR",
        ),
        Rule::source(
            RULE_CLEANUP_AUTO_START,
            "cleanup coroutine starts automatically",
            SOURCE_CLEANUP,
            "StartCoroutine(ResourceCleanupCoroutine())",
        ),
    ]
}
