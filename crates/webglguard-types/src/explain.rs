//! Explain registry for rules and codes.
//!
//! Maps rule IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a rule or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule/code.
    pub title: &'static str,
    /// What the rule checks and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after examples.
    pub examples: ExamplePair,
}

/// Before and after examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Fence language for both snippets (`yaml` for assets, `csharp` for sources).
    pub lang: &'static str,
    /// Snippet that would fail the rule.
    pub before: &'static str,
    /// Snippet that passes the rule.
    pub after: &'static str,
}

/// Look up an explanation by rule_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    if let Some(exp) = rule_explanation(identifier) {
        return Some(exp);
    }
    match identifier {
        ids::CODE_MISSING_KEY => Some(explain_missing_key()),
        ids::CODE_TYPE_MISMATCH => Some(explain_type_mismatch()),
        ids::CODE_VIOLATION => Some(explain_violation()),
        _ => None,
    }
}

/// List all known rule IDs.
pub fn all_rule_ids() -> &'static [&'static str] {
    &[
        ids::RULE_MEMORY_INITIAL_SIZE,
        ids::RULE_MEMORY_INITIAL_SIZE_RANGE,
        ids::RULE_MEMORY_GROWTH_MODE,
        ids::RULE_MEMORY_LINEAR_STEP,
        ids::RULE_MEMORY_GEOMETRIC_STEP,
        ids::RULE_MEMORY_GEOMETRIC_CAP,
        ids::RULE_MIPMAPS_ACTIVE,
        ids::RULE_MIPMAPS_ADD_ALL_CAMERAS,
        ids::RULE_MIPMAPS_MEMORY_BUDGET,
        ids::RULE_MIPMAPS_BUDGET_WITHIN_MEMORY,
        ids::RULE_MIPMAPS_MAX_LEVEL_REDUCTION,
        ids::RULE_QUALITY_PRESET_PRESENT,
        ids::RULE_QUALITY_PIXEL_LIGHT_COUNT,
        ids::RULE_QUALITY_SHADOWS,
        ids::RULE_QUALITY_SHADOW_RESOLUTION,
        ids::RULE_QUALITY_ANTI_ALIASING,
        ids::RULE_QUALITY_ASYNC_UPLOAD_BUFFER,
        ids::RULE_QUALITY_ASYNC_UPLOAD_TIME_SLICE,
        ids::RULE_QUALITY_PARTICLE_RAYCAST_BUDGET,
        ids::RULE_QUALITY_STREAMING_MIPMAPS,
        ids::RULE_BUILD_PRODUCTION_ENTRY,
        ids::RULE_BUILD_DEBUG_ENTRY,
        ids::RULE_BUILD_EXCEPTION_SUPPORT,
        ids::RULE_BUILD_COMPRESSION,
        ids::RULE_BUILD_DECOMPRESSION_FALLBACK,
        ids::RULE_BUILD_LINKER_TARGET,
        ids::RULE_BUILD_DATA_CACHING,
        ids::RULE_CLEANUP_COROUTINE,
        ids::RULE_CLEANUP_INTERVAL,
        ids::RULE_CLEANUP_UNLOAD_ASSETS,
        ids::RULE_CLEANUP_GC_COLLECT,
        ids::RULE_CLEANUP_WEBGL_ONLY,
        ids::RULE_CLEANUP_AUTO_START,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_MISSING_KEY,
        ids::CODE_TYPE_MISMATCH,
        ids::CODE_VIOLATION,
    ]
}

fn asset(before: &'static str, after: &'static str) -> ExamplePair {
    ExamplePair {
        lang: "yaml",
        before,
        after,
    }
}

fn csharp(before: &'static str, after: &'static str) -> ExamplePair {
    ExamplePair {
        lang: "csharp",
        before,
        after,
    }
}

fn rule_explanation(rule_id: &str) -> Option<Explanation> {
    let exp = match rule_id {
        // --- memory ---
        ids::RULE_MEMORY_INITIAL_SIZE => Explanation {
            title: "Initial WebGL Heap Is 64 MB",
            description: "\
Checks `webGLMemorySize` in the player settings. A 64 MB initial heap keeps
startup cheap on low-end browsers while growth settings cover larger worlds.",
            remediation: "\
Set Player Settings > WebGL > Memory Settings > Initial Memory Size to 64.",
            examples: asset("webGLMemorySize: 256", "webGLMemorySize: 64"),
        },
        ids::RULE_MEMORY_INITIAL_SIZE_RANGE => Explanation {
            title: "Initial WebGL Heap Within Browser Limits",
            description: "\
Checks that `webGLMemorySize` is at least 32 MB and below 4096 MB. Smaller heaps
cannot boot the runtime and 4 GB is the hard wasm32 address-space ceiling.",
            remediation: "Pick an initial memory size in [32, 4096) MB.",
            examples: asset("webGLMemorySize: 8192", "webGLMemorySize: 64"),
        },
        ids::RULE_MEMORY_GROWTH_MODE => Explanation {
            title: "Memory Growth Enabled",
            description: "\
Checks `webGLMemoryGrowthMode`. With growth disabled the heap is fixed at the
initial size and the player aborts with an out-of-memory error.",
            remediation: "Set the memory growth mode to Linear or Geometric (non-zero).",
            examples: asset("webGLMemoryGrowthMode: 0", "webGLMemoryGrowthMode: 1"),
        },
        ids::RULE_MEMORY_LINEAR_STEP => Explanation {
            title: "Linear Growth Step Is 32 MB",
            description: "\
Checks `webGLMemoryGrowthStep`. A 32 MB step allows more than sixty growth steps
from 64 MB up to the 2048 MB maximum.",
            remediation: "Set the linear memory growth step to 32.",
            examples: asset("webGLMemoryGrowthStep: 16", "webGLMemoryGrowthStep: 32"),
        },
        ids::RULE_MEMORY_GEOMETRIC_STEP => Explanation {
            title: "Geometric Growth Step Is 0.15",
            description: "\
Checks `webGLMemoryGeometricStep` with a tolerance. Large factors over-allocate
on the final growth steps; small factors cause frequent reallocation.",
            remediation: "Set the geometric memory growth step to 0.15.",
            examples: asset(
                "webGLMemoryGeometricStep: 0.5",
                "webGLMemoryGeometricStep: 0.15",
            ),
        },
        ids::RULE_MEMORY_GEOMETRIC_CAP => Explanation {
            title: "Geometric Growth Cap Is 128 MB",
            description: "\
Checks `webGLMemoryGeometricCap`, the largest single geometric growth step.",
            remediation: "Set the geometric memory growth cap to 128.",
            examples: asset("webGLMemoryGeometricCap: 96", "webGLMemoryGeometricCap: 128"),
        },

        // --- texture streaming ---
        ids::RULE_MIPMAPS_ACTIVE => Explanation {
            title: "Texture Streaming Enabled",
            description: "\
Checks `streamingMipmapsActive` in the quality settings. Streaming mipmaps keeps
only the mip levels cameras need resident in GPU memory.",
            remediation: "Enable Quality > Texture Streaming.",
            examples: asset("streamingMipmapsActive: 0", "streamingMipmapsActive: 1"),
        },
        ids::RULE_MIPMAPS_ADD_ALL_CAMERAS => Explanation {
            title: "Texture Streaming Uses All Cameras",
            description: "Checks `streamingMipmapsAddAllCameras` so every camera drives mip selection.",
            remediation: "Enable Quality > Texture Streaming > Add All Cameras.",
            examples: asset(
                "streamingMipmapsAddAllCameras: 0",
                "streamingMipmapsAddAllCameras: 1",
            ),
        },
        ids::RULE_MIPMAPS_MEMORY_BUDGET => Explanation {
            title: "Texture Streaming Budget Is 256 MB",
            description: "Checks `streamingMipmapsMemoryBudget`.",
            remediation: "Set Quality > Texture Streaming > Memory Budget to 256.",
            examples: asset(
                "streamingMipmapsMemoryBudget: 512",
                "streamingMipmapsMemoryBudget: 256",
            ),
        },
        ids::RULE_MIPMAPS_BUDGET_WITHIN_MEMORY => Explanation {
            title: "Texture Budget Between Initial And Maximum Heap",
            description: "\
Checks that the streaming budget is strictly greater than the 64 MB initial heap
and strictly less than the 2048 MB maximum heap.",
            remediation: "Choose a memory budget in the open interval (64, 2048) MB.",
            examples: asset(
                "streamingMipmapsMemoryBudget: 4096",
                "streamingMipmapsMemoryBudget: 256",
            ),
        },
        ids::RULE_MIPMAPS_MAX_LEVEL_REDUCTION => Explanation {
            title: "Texture Streaming Max Level Reduction Is 3",
            description: "Checks `streamingMipmapsMaxLevelReduction`.",
            remediation: "Set Quality > Texture Streaming > Max Level Reduction to 3.",
            examples: asset(
                "streamingMipmapsMaxLevelReduction: 2",
                "streamingMipmapsMaxLevelReduction: 3",
            ),
        },

        // --- quality preset ---
        ids::RULE_QUALITY_PRESET_PRESENT => Explanation {
            title: "WebGL-Optimized Quality Level Exists",
            description: "\
Checks that the quality settings define a level named exactly `WebGL-Optimized`
(`quality.WebGL-Optimized.name`). Levels such as `WebGL-Optimized-Legacy` do not
count. The remaining `quality.*` rules inspect that level.",
            remediation: "Add a quality level named `WebGL-Optimized` in Project Settings > Quality.",
            examples: asset(
                "m_QualitySettings:\n  - name: High",
                "m_QualitySettings:\n  - name: High\n  - name: WebGL-Optimized",
            ),
        },
        ids::RULE_QUALITY_PIXEL_LIGHT_COUNT => Explanation {
            title: "One Pixel Light",
            description: "Checks `pixelLightCount` of the WebGL-Optimized quality level.",
            remediation: "Set Pixel Light Count to 1.",
            examples: asset("pixelLightCount: 4", "pixelLightCount: 1"),
        },
        ids::RULE_QUALITY_SHADOWS => Explanation {
            title: "Hard Shadows Only",
            description: "Checks `shadows` of the WebGL-Optimized quality level (1 = hard only).",
            remediation: "Set Shadows to Hard Shadows Only.",
            examples: asset("shadows: 2", "shadows: 1"),
        },
        ids::RULE_QUALITY_SHADOW_RESOLUTION => Explanation {
            title: "Lowest Shadow Resolution",
            description: "Checks `shadowResolution` of the WebGL-Optimized quality level.",
            remediation: "Set Shadow Resolution to Low.",
            examples: asset("shadowResolution: 2", "shadowResolution: 0"),
        },
        ids::RULE_QUALITY_ANTI_ALIASING => Explanation {
            title: "Anti-Aliasing Disabled",
            description: "Checks `antiAliasing` of the WebGL-Optimized quality level.",
            remediation: "Disable MSAA for the WebGL-Optimized level.",
            examples: asset("antiAliasing: 4", "antiAliasing: 0"),
        },
        ids::RULE_QUALITY_ASYNC_UPLOAD_BUFFER => Explanation {
            title: "Async Upload Buffer Is 8 MB",
            description: "Checks `asyncUploadBufferSize` of the WebGL-Optimized quality level.",
            remediation: "Set Async Upload Buffer Size to 8.",
            examples: asset("asyncUploadBufferSize: 16", "asyncUploadBufferSize: 8"),
        },
        ids::RULE_QUALITY_ASYNC_UPLOAD_TIME_SLICE => Explanation {
            title: "Async Upload Time Slice Is 2 ms",
            description: "Checks `asyncUploadTimeSlice` of the WebGL-Optimized quality level.",
            remediation: "Set Async Upload Time Slice to 2.",
            examples: asset("asyncUploadTimeSlice: 4", "asyncUploadTimeSlice: 2"),
        },
        ids::RULE_QUALITY_PARTICLE_RAYCAST_BUDGET => Explanation {
            title: "Particle Raycast Budget Is 64",
            description: "Checks `particleRaycastBudget` of the WebGL-Optimized quality level.",
            remediation: "Set Particle Raycast Budget to 64.",
            examples: asset("particleRaycastBudget: 256", "particleRaycastBudget: 64"),
        },
        ids::RULE_QUALITY_STREAMING_MIPMAPS => Explanation {
            title: "Quality Level Streams Mipmaps",
            description: "Checks `streamingMipmapsActive` inside the WebGL-Optimized quality level.",
            remediation: "Enable Texture Streaming on the WebGL-Optimized level.",
            examples: asset("streamingMipmapsActive: 0", "streamingMipmapsActive: 1"),
        },

        // --- build script ---
        ids::RULE_BUILD_PRODUCTION_ENTRY => Explanation {
            title: "Build Script Has Production Entry Point",
            description: "Checks that the build script defines `BuildProduction`.",
            remediation: "Add a `public static void BuildProduction()` method to the builder.",
            examples: csharp(
                "public static void Build() { }",
                "public static void BuildProduction() { }",
            ),
        },
        ids::RULE_BUILD_DEBUG_ENTRY => Explanation {
            title: "Build Script Has Debug Entry Point",
            description: "Checks that the build script defines `BuildDebug`.",
            remediation: "Add a `public static void BuildDebug()` method to the builder.",
            examples: csharp(
                "public static void Build() { }",
                "public static void BuildDebug() { }",
            ),
        },
        ids::RULE_BUILD_EXCEPTION_SUPPORT => Explanation {
            title: "Exception Support Matches Build Profile",
            description: "\
Production builds should only support explicitly thrown exceptions, which removes
most exception-handling code from the wasm output. Debug builds keep full
exception support without stack traces.",
            remediation: "\
Assign `PlayerSettings.WebGL.exceptionSupport` in the builder: use
`ExplicitlyThrownExceptionsOnly` for production and `FullWithoutStackTrace` for debug.",
            examples: csharp(
                "PlayerSettings.WebGL.exceptionSupport = WebGLExceptionSupport.FullWithStacktrace;",
                "PlayerSettings.WebGL.exceptionSupport = WebGLExceptionSupport.ExplicitlyThrownExceptionsOnly;",
            ),
        },
        ids::RULE_BUILD_COMPRESSION => Explanation {
            title: "Gzip Compression",
            description: "Checks that the builder selects `WebGLCompressionFormat.Gzip`.",
            remediation: "Set `PlayerSettings.WebGL.compressionFormat = WebGLCompressionFormat.Gzip;`.",
            examples: csharp(
                "PlayerSettings.WebGL.compressionFormat = WebGLCompressionFormat.Disabled;",
                "PlayerSettings.WebGL.compressionFormat = WebGLCompressionFormat.Gzip;",
            ),
        },
        ids::RULE_BUILD_DECOMPRESSION_FALLBACK => Explanation {
            title: "Decompression Fallback Enabled",
            description: "\
Checks that the builder enables the JavaScript decompression fallback so hosts
without `Content-Encoding` headers still serve the build.",
            remediation: "Set `PlayerSettings.WebGL.decompressionFallback = true;`.",
            examples: csharp(
                "PlayerSettings.WebGL.decompressionFallback = false;",
                "PlayerSettings.WebGL.decompressionFallback = true;",
            ),
        },
        ids::RULE_BUILD_LINKER_TARGET => Explanation {
            title: "Wasm Linker Target",
            description: "Checks that the builder selects `WebGLLinkerTarget.Wasm`.",
            remediation: "Set `PlayerSettings.WebGL.linkerTarget = WebGLLinkerTarget.Wasm;`.",
            examples: csharp(
                "PlayerSettings.WebGL.linkerTarget = WebGLLinkerTarget.Both;",
                "PlayerSettings.WebGL.linkerTarget = WebGLLinkerTarget.Wasm;",
            ),
        },
        ids::RULE_BUILD_DATA_CACHING => Explanation {
            title: "Data Caching Enabled",
            description: "Checks that the builder enables IndexedDB caching of build data.",
            remediation: "Set `PlayerSettings.WebGL.dataCaching = true;`.",
            examples: csharp(
                "PlayerSettings.WebGL.dataCaching = false;",
                "PlayerSettings.WebGL.dataCaching = true;",
            ),
        },

        // --- cleanup coroutine ---
        ids::RULE_CLEANUP_COROUTINE => Explanation {
            title: "Resource Cleanup Coroutine Defined",
            description: "Checks that the runtime defines `ResourceCleanupCoroutine`.",
            remediation: "Add an `IEnumerator ResourceCleanupCoroutine()` to the runtime behaviour.",
            examples: csharp(
                "private void Start() { }",
                "private IEnumerator ResourceCleanupCoroutine() { while (true) { yield return null; } }",
            ),
        },
        ids::RULE_CLEANUP_INTERVAL => Explanation {
            title: "Cleanup Runs Every 60 Seconds",
            description: "Checks that the cleanup loop waits `WaitForSeconds(60f)` between passes.",
            remediation: "Yield `new WaitForSeconds(60f)` at the top of the cleanup loop.",
            examples: csharp(
                "yield return new WaitForSeconds(5f);",
                "yield return new WaitForSeconds(60f);",
            ),
        },
        ids::RULE_CLEANUP_UNLOAD_ASSETS => Explanation {
            title: "Cleanup Unloads Unused Assets",
            description: "Checks that the cleanup loop calls `Resources.UnloadUnusedAssets()`.",
            remediation: "Call `Resources.UnloadUnusedAssets();` in every cleanup pass.",
            examples: csharp("// nothing unloaded", "Resources.UnloadUnusedAssets();"),
        },
        ids::RULE_CLEANUP_GC_COLLECT => Explanation {
            title: "Cleanup Collects Garbage",
            description: "Checks that the cleanup loop calls `System.GC.Collect()`.",
            remediation: "Call `System.GC.Collect();` after unloading assets.",
            examples: csharp("// no collection", "System.GC.Collect();"),
        },
        ids::RULE_CLEANUP_WEBGL_ONLY => Explanation {
            title: "Cleanup Is WebGL-Only",
            description: "\
Checks that the cleanup code is guarded by `UNITY_WEBGL && !UNITY_EDITOR` so
other platforms and the editor are unaffected.",
            remediation: "Wrap the coroutine and its start-up in `#if UNITY_WEBGL && !UNITY_EDITOR`.",
            examples: csharp(
                "StartCoroutine(ResourceCleanupCoroutine());",
                "#if UNITY_WEBGL && !UNITY_EDITOR\nStartCoroutine(ResourceCleanupCoroutine());\n#endif",
            ),
        },
        ids::RULE_CLEANUP_AUTO_START => Explanation {
            title: "Cleanup Starts Automatically",
            description: "Checks that the runtime starts the coroutine with `StartCoroutine`.",
            remediation: "Call `StartCoroutine(ResourceCleanupCoroutine());` from `Start()`.",
            examples: csharp(
                "private void Start() { }",
                "private void Start() { StartCoroutine(ResourceCleanupCoroutine()); }",
            ),
        },
        _ => return None,
    };
    Some(exp)
}

// --- Code-level explanations ---

fn explain_missing_key() -> Explanation {
    Explanation {
        title: "Missing Key",
        description: "\
The rule's settings key or source was not present in the loaded snapshot. Either the
asset file does not exist, the key was never serialized, or the source pattern
matched no file.",
        remediation: "\
Check that `ProjectSettings/ProjectSettings.asset` and
`ProjectSettings/QualitySettings.asset` exist and that `[sources]` in
`webglguard.toml` points at the right files.",
        examples: ExamplePair {
            lang: "toml",
            before: "[sources]\nbuilder = \"Assets/Build/Missing.cs\"",
            after: "[sources]\nbuilder = \"Assets/Build/Builder.cs\"",
        },
    }
}

fn explain_type_mismatch() -> Explanation {
    Explanation {
        title: "Type Mismatch",
        description: "\
The value found in the snapshot has a different type than the rule's predicate
expects, e.g. a text value where a numeric range was required.",
        remediation: "Fix the serialized value, or correct the custom rule's check kind.",
        examples: ExamplePair {
            lang: "yaml",
            before: "streamingMipmapsMemoryBudget: large",
            after: "streamingMipmapsMemoryBudget: 256",
        },
    }
}

fn explain_violation() -> Explanation {
    Explanation {
        title: "Policy Violation",
        description: "\
The value was found and had the right type, but did not satisfy the rule
(wrong value, out of range, or required text absent).",
        remediation: "Run `webglguard explain <rule_id>` for rule-specific guidance.",
        examples: ExamplePair {
            lang: "yaml",
            before: "webGLMemorySize: 256",
            after: "webGLMemorySize: 64",
        },
    }
}
