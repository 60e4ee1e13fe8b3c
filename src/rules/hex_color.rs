use once_cell::sync::Lazy;
use regex::Regex;

use super::Context;
use crate::ast::Stylesheet;
use crate::value::mask_literals;

const MSG: &str = "Color value must use the hexadecimal mark forms such as `#RRGGBB`. \
                   Don't use RGB, HSL expression";

/// Color keywords LESS knows about.
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgrey", "darkgreen", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "grey", "green", "greenyellow", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgrey", "lightgreen",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen",
];

/// A color name followed by `(` is a function call such as `tan(45deg)`.
static NAMED_COLOR: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"(?i)(?:^|[^\w@-])({})(?:[^\w(-]|$)", NAMED_COLORS.join("|"));
    Regex::new(&pattern).expect("valid color name pattern")
});

static COLOR_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\w-])((?:rgb|hsl|hsv)\()").expect("valid color function pattern")
});

/// `@name`, `@@name` and `@{name}` references.
static VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@@?(?:\{[^}]*\}|[\w-]+)").expect("valid variable pattern"));

pub fn check(sheet: &Stylesheet, cx: &mut Context<'_>) {
    sheet.walk_decls(|decl, _| {
        let masked = mask_literals(&decl.value);
        let masked = VARIABLE.replace_all(&masked, |caps: &regex::Captures<'_>| {
            " ".repeat(caps[0].len())
        });
        let line = decl.source.start.line;

        for pattern in [&*NAMED_COLOR, &*COLOR_FUNCTION] {
            if let Some(found) = pattern.captures(&masked).and_then(|caps| caps.get(1)) {
                let segment = &decl.value[found.start()..found.end()];
                cx.report_quoted(line, super::value_offset_column(decl, found.start()), segment, MSG);
            }
        }
    });
}
