//! Static registry of d3 modules and their documentation pages on d3js.org.

use ahash::AHashMap;
use rapidfuzz::distance::jaro_winkler;
use std::sync::LazyLock;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;
const MAX_SUGGESTIONS: usize = 3;

/// One d3 module and the pages documenting it.
///
/// The first entry of `pages` is always the module's index page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleRecord {
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub pages: &'static [&'static str],
}

impl ModuleRecord {
    /// Name without the `d3-` prefix: `d3-scale` → `scale`.
    pub fn short_name(&self) -> &'static str {
        self.name.strip_prefix("d3-").unwrap_or(self.name)
    }

    /// The module's index page path.
    pub fn index_page(&self) -> &'static str {
        self.pages[0]
    }

    /// Last path segment of every page after the index page.
    pub fn sub_page_names(&self) -> Vec<&'static str> {
        self.pages
            .iter()
            .skip(1)
            .map(|page| page.rsplit('/').next().unwrap_or(page))
            .collect()
    }
}

pub static MODULES: &[ModuleRecord] = &[
    ModuleRecord {
        name: "d3-array",
        description: "Array manipulation, statistics, searching, and sorting.",
        tags: &["array", "statistics", "sort", "bin", "group", "min", "max", "mean"],
        pages: &[
            "/d3-array",
            "/d3-array/add",
            "/d3-array/bin",
            "/d3-array/bisect",
            "/d3-array/blur",
            "/d3-array/group",
            "/d3-array/intern",
            "/d3-array/sets",
            "/d3-array/sort",
            "/d3-array/summarize",
            "/d3-array/ticks",
            "/d3-array/transform",
        ],
    },
    ModuleRecord {
        name: "d3-axis",
        description: "Human-readable reference marks for scales.",
        tags: &["axis", "tick", "scale", "svg"],
        pages: &["/d3-axis"],
    },
    ModuleRecord {
        name: "d3-brush",
        description: "Select a one- or two-dimensional region using the mouse or touch.",
        tags: &["brush", "selection", "interaction", "mouse", "touch"],
        pages: &["/d3-brush"],
    },
    ModuleRecord {
        name: "d3-chord",
        description: "Chord diagrams visualizing relationships between groups.",
        tags: &["chord", "diagram", "ribbon", "relationship", "matrix"],
        pages: &[
            "/d3-chord",
            "/d3-chord/chord",
            "/d3-chord/ribbon",
        ],
    },
    ModuleRecord {
        name: "d3-color",
        description: "Color spaces including RGB, HSL, Cubehelix, CIELAB.",
        tags: &["color", "rgb", "hsl", "lab", "hcl", "cubehelix"],
        pages: &["/d3-color"],
    },
    ModuleRecord {
        name: "d3-contour",
        description: "Compute contour polygons using marching squares.",
        tags: &["contour", "density", "topography", "isoline"],
        pages: &[
            "/d3-contour",
            "/d3-contour/contour",
            "/d3-contour/density",
        ],
    },
    ModuleRecord {
        name: "d3-delaunay",
        description: "Voronoi diagrams and Delaunay triangulation.",
        tags: &["voronoi", "delaunay", "triangulation", "diagram"],
        pages: &[
            "/d3-delaunay",
            "/d3-delaunay/delaunay",
            "/d3-delaunay/voronoi",
        ],
    },
    ModuleRecord {
        name: "d3-dispatch",
        description: "Register named callbacks and invoke them with arguments.",
        tags: &["dispatch", "event", "callback"],
        pages: &["/d3-dispatch"],
    },
    ModuleRecord {
        name: "d3-drag",
        description: "Drag-and-drop interaction for mouse and touch input.",
        tags: &["drag", "interaction", "mouse", "touch"],
        pages: &["/d3-drag"],
    },
    ModuleRecord {
        name: "d3-dsv",
        description: "Parse and format delimiter-separated values, notably CSV and TSV.",
        tags: &["csv", "tsv", "dsv", "parse", "format", "delimiter"],
        pages: &["/d3-dsv"],
    },
    ModuleRecord {
        name: "d3-ease",
        description: "Easing functions for smooth animation transitions.",
        tags: &["ease", "easing", "animation", "transition"],
        pages: &["/d3-ease"],
    },
    ModuleRecord {
        name: "d3-fetch",
        description: "Convenience methods on top of the Fetch API.",
        tags: &["fetch", "csv", "json", "text", "xml", "load"],
        pages: &["/d3-fetch"],
    },
    ModuleRecord {
        name: "d3-force",
        description: "Force-directed graph layout using velocity Verlet integration.",
        tags: &["force", "graph", "layout", "simulation", "network", "collision"],
        pages: &[
            "/d3-force",
            "/d3-force/simulation",
            "/d3-force/center",
            "/d3-force/collide",
            "/d3-force/link",
            "/d3-force/many-body",
            "/d3-force/position",
        ],
    },
    ModuleRecord {
        name: "d3-format",
        description: "Format numbers for human consumption.",
        tags: &["format", "number", "locale", "SI", "currency", "percent"],
        pages: &["/d3-format"],
    },
    ModuleRecord {
        name: "d3-geo",
        description: "Geographic projections, spherical shapes, and math.",
        tags: &["geo", "map", "projection", "geography", "sphere", "graticule"],
        pages: &[
            "/d3-geo",
            "/d3-geo/path",
            "/d3-geo/projection",
            "/d3-geo/azimuthal",
            "/d3-geo/conic",
            "/d3-geo/cylindrical",
            "/d3-geo/stream",
            "/d3-geo/shape",
            "/d3-geo/math",
        ],
    },
    ModuleRecord {
        name: "d3-hierarchy",
        description: "Layout algorithms for hierarchical data.",
        tags: &["hierarchy", "tree", "treemap", "pack", "partition", "cluster"],
        pages: &[
            "/d3-hierarchy",
            "/d3-hierarchy/hierarchy",
            "/d3-hierarchy/stratify",
            "/d3-hierarchy/tree",
            "/d3-hierarchy/cluster",
            "/d3-hierarchy/partition",
            "/d3-hierarchy/pack",
            "/d3-hierarchy/treemap",
        ],
    },
    ModuleRecord {
        name: "d3-interpolate",
        description: "Interpolate numbers, colors, strings, arrays, and more.",
        tags: &["interpolate", "color", "number", "string", "zoom", "tween"],
        pages: &[
            "/d3-interpolate",
            "/d3-interpolate/value",
            "/d3-interpolate/color",
            "/d3-interpolate/transform",
            "/d3-interpolate/zoom",
        ],
    },
    ModuleRecord {
        name: "d3-path",
        description: "Serialize Canvas path commands to SVG path data.",
        tags: &["path", "canvas", "svg", "serialize"],
        pages: &["/d3-path"],
    },
    ModuleRecord {
        name: "d3-polygon",
        description: "Geometric operations for two-dimensional polygons.",
        tags: &["polygon", "hull", "centroid", "area", "convex"],
        pages: &["/d3-polygon"],
    },
    ModuleRecord {
        name: "d3-quadtree",
        description: "Two-dimensional recursive spatial subdivision.",
        tags: &["quadtree", "spatial", "collision", "search"],
        pages: &["/d3-quadtree"],
    },
    ModuleRecord {
        name: "d3-random",
        description: "Random number generators for various distributions.",
        tags: &["random", "distribution", "normal", "uniform", "exponential"],
        pages: &["/d3-random"],
    },
    ModuleRecord {
        name: "d3-scale",
        description: "Encodings that map abstract data to visual representation.",
        tags: &["scale", "linear", "log", "ordinal", "band", "point", "time"],
        pages: &[
            "/d3-scale",
            "/d3-scale/linear",
            "/d3-scale/time",
            "/d3-scale/pow",
            "/d3-scale/log",
            "/d3-scale/symlog",
            "/d3-scale/ordinal",
            "/d3-scale/band",
            "/d3-scale/point",
            "/d3-scale/sequential",
            "/d3-scale/diverging",
            "/d3-scale/quantile",
            "/d3-scale/quantize",
            "/d3-scale/threshold",
        ],
    },
    ModuleRecord {
        name: "d3-scale-chromatic",
        description: "Sequential, diverging, and categorical color schemes.",
        tags: &["color", "scheme", "chromatic", "sequential", "diverging"],
        pages: &[
            "/d3-scale-chromatic",
            "/d3-scale-chromatic/categorical",
            "/d3-scale-chromatic/cyclical",
            "/d3-scale-chromatic/diverging",
            "/d3-scale-chromatic/sequential",
        ],
    },
    ModuleRecord {
        name: "d3-selection",
        description: "Transform the DOM by selecting elements and binding data.",
        tags: &["selection", "dom", "data", "bindattr", "bindstyle", "bindhtml"],
        pages: &[
            "/d3-selection",
            "/d3-selection/selecting",
            "/d3-selection/modifying",
            "/d3-selection/joining",
            "/d3-selection/events",
            "/d3-selection/control-flow",
            "/d3-selection/locals",
            "/d3-selection/namespaces",
        ],
    },
    ModuleRecord {
        name: "d3-shape",
        description: "Graphical primitives for visualization.",
        tags: &["shape", "arc", "pie", "line", "area", "curve", "stack", "symbol"],
        pages: &[
            "/d3-shape",
            "/d3-shape/arc",
            "/d3-shape/area",
            "/d3-shape/curve",
            "/d3-shape/line",
            "/d3-shape/link",
            "/d3-shape/pie",
            "/d3-shape/stack",
            "/d3-shape/symbol",
            "/d3-shape/radial-area",
            "/d3-shape/radial-line",
            "/d3-shape/radial-link",
        ],
    },
    ModuleRecord {
        name: "d3-time",
        description: "A calculator for humanity's eccentric conventions of time.",
        tags: &["time", "interval", "day", "week", "month", "year", "hour"],
        pages: &["/d3-time"],
    },
    ModuleRecord {
        name: "d3-time-format",
        description: "Parse and format times inspired by strptime and strftime.",
        tags: &["time", "format", "parse", "date", "locale", "strftime"],
        pages: &["/d3-time-format"],
    },
    ModuleRecord {
        name: "d3-timer",
        description: "Efficient queue for managing concurrent animations.",
        tags: &["timer", "animation", "interval", "timeout", "frame"],
        pages: &["/d3-timer"],
    },
    ModuleRecord {
        name: "d3-transition",
        description: "Animated transitions for D3 selections.",
        tags: &["transition", "animation", "selection", "tween", "ease"],
        pages: &[
            "/d3-transition",
            "/d3-transition/selecting",
            "/d3-transition/modifying",
            "/d3-transition/timing",
            "/d3-transition/control-flow",
        ],
    },
    ModuleRecord {
        name: "d3-zoom",
        description: "Pan and zoom SVG, HTML or Canvas using mouse or touch.",
        tags: &["zoom", "pan", "interaction", "mouse", "touch", "transform"],
        pages: &["/d3-zoom"],
    },
];

static MODULE_MAP: LazyLock<AHashMap<&'static str, &'static ModuleRecord>> =
    LazyLock::new(|| MODULES.iter().map(|module| (module.name, module)).collect());

static PAGE_INDEX: LazyLock<AHashMap<&'static str, &'static ModuleRecord>> = LazyLock::new(|| {
    MODULES
        .iter()
        .flat_map(|module| module.pages.iter().map(move |page| (*page, module)))
        .collect()
});

/// Module name → record.
pub fn module_map() -> &'static AHashMap<&'static str, &'static ModuleRecord> {
    &MODULE_MAP
}

/// Page path → owning module.
pub fn page_index() -> &'static AHashMap<&'static str, &'static ModuleRecord> {
    &PAGE_INDEX
}

/// Look up a module by its canonical name.
pub fn module(name: &str) -> Option<&'static ModuleRecord> {
    MODULE_MAP.get(name).copied()
}

/// Normalize a module name: `"d3-scale"`, `"scale"` and `" D3-Scale "` all resolve
/// to `"d3-scale"`.
pub fn resolve_module_name(name: &str) -> Option<&'static str> {
    let name = name.trim().to_lowercase();
    if let Some(module) = MODULE_MAP.get(name.as_str()) {
        return Some(module.name);
    }
    MODULE_MAP.get(format!("d3-{}", name).as_str()).map(|module| module.name)
}

/// Resolve `"d3-scale/linear"` or `"/d3-scale/linear"` to a canonical page path.
pub fn resolve_page_path(path: &str) -> Option<&'static str> {
    let path = path.trim().to_lowercase();
    let path = if path.starts_with('/') { path } else { format!("/{}", path) };
    PAGE_INDEX.get_key_value(path.as_str()).map(|(page, _)| *page)
}

/// Module names close to a misspelled `name`, best first.
///
/// Both the full name and the short name are compared.
pub fn suggest_modules(name: &str) -> Vec<&'static str> {
    let name = name.trim().to_lowercase();
    let mut scored: Vec<(&'static str, f64)> = MODULES
        .iter()
        .map(|module| {
            let full = jaro_winkler::similarity(name.chars(), module.name.chars());
            let short = jaro_winkler::similarity(name.chars(), module.short_name().chars());
            (module.name, full.max(short))
        })
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().take(MAX_SUGGESTIONS).map(|(name, _)| name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[test]
    fn test_registry_shape() {
        check!(MODULES.len() == 30);
        check!(MODULES.first().map(|m| m.name) == Some("d3-array"));
        check!(MODULES.last().map(|m| m.name) == Some("d3-zoom"));
        for module in MODULES {
            check!(module.name.starts_with("d3-"));
            check!(!module.pages.is_empty());
            check!(module.index_page() == format!("/{}", module.name));
            check!(module.pages.iter().all(|p| p.starts_with(module.index_page())));
        }
    }

    #[test]
    fn test_every_page_indexed_once() {
        let total: usize = MODULES.iter().map(|m| m.pages.len()).sum();
        check!(page_index().len() == total);
        check!(module_map().len() == MODULES.len());
    }

    #[rstest]
    #[case("d3-scale", Some("d3-scale"))]
    #[case("scale", Some("d3-scale"))]
    #[case("D3-Scale", Some("d3-scale"))]
    #[case("  Shape ", Some("d3-shape"))]
    #[case("d3-nonexistent", None)]
    #[case("", None)]
    fn test_resolve_module_name(#[case] input: &str, #[case] expected: Option<&str>) {
        check!(resolve_module_name(input) == expected);
    }

    #[rstest]
    #[case("/d3-scale/linear", Some("/d3-scale/linear"))]
    #[case("d3-scale/linear", Some("/d3-scale/linear"))]
    #[case(" D3-Scale/Linear ", Some("/d3-scale/linear"))]
    #[case("d3-axis", Some("/d3-axis"))]
    #[case("/d3-scale/nope", None)]
    fn test_resolve_page_path(#[case] input: &str, #[case] expected: Option<&str>) {
        check!(resolve_page_path(input) == expected);
    }

    #[rstest]
    #[case("d3-scael", "d3-scale")]
    #[case("sclae", "d3-scale")]
    #[case("selectoin", "d3-selection")]
    fn test_suggest_modules(#[case] input: &str, #[case] expected: &str) {
        let suggestions = suggest_modules(input);
        check!(suggestions.first() == Some(&expected));
        check!(suggestions.len() <= MAX_SUGGESTIONS);
    }

    #[test]
    fn test_no_suggestions_for_unrelated_names() {
        check!(suggest_modules("qqqqqqqq").is_empty());
    }

    #[test]
    fn test_record_helpers() {
        let_assert!(Some(scale) = module("d3-scale"));
        check!(scale.short_name() == "scale");
        check!(scale.sub_page_names().first() == Some(&"linear"));
        check!(scale.sub_page_names().len() == scale.pages.len() - 1);

        let_assert!(Some(axis) = module("d3-axis"));
        check!(axis.sub_page_names().is_empty());
    }
}
