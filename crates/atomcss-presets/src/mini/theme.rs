//! Default theme values.
//!
//! Copyright (c) 2025 Posit, PBC

use atomcss_engine::{AnimationKind, Theme, ThemeScope};

const SHADES: [&str; 10] = ["50", "100", "200", "300", "400", "500", "600", "700", "800", "900"];

const PALETTE: &[(&str, [&str; 10])] = &[
    (
        "slate",
        [
            "#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569",
            "#334155", "#1e293b", "#0f172a",
        ],
    ),
    (
        "gray",
        [
            "#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563",
            "#374151", "#1f2937", "#111827",
        ],
    ),
    (
        "red",
        [
            "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626",
            "#b91c1c", "#991b1b", "#7f1d1d",
        ],
    ),
    (
        "orange",
        [
            "#fff7ed", "#ffedd5", "#fed7aa", "#fdba74", "#fb923c", "#f97316", "#ea580c",
            "#c2410c", "#9a3412", "#7c2d12",
        ],
    ),
    (
        "yellow",
        [
            "#fefce8", "#fef9c3", "#fef08a", "#fde047", "#facc15", "#eab308", "#ca8a04",
            "#a16207", "#854d0e", "#713f12",
        ],
    ),
    (
        "green",
        [
            "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a",
            "#15803d", "#166534", "#14532d",
        ],
    ),
    (
        "blue",
        [
            "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb",
            "#1d4ed8", "#1e40af", "#1e3a8a",
        ],
    ),
    (
        "indigo",
        [
            "#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5",
            "#4338ca", "#3730a3", "#312e81",
        ],
    ),
    (
        "purple",
        [
            "#faf5ff", "#f3e8ff", "#e9d5ff", "#d8b4fe", "#c084fc", "#a855f7", "#9333ea",
            "#7e22ce", "#6b21a8", "#581c87",
        ],
    ),
    (
        "pink",
        [
            "#fdf2f8", "#fce7f3", "#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899", "#db2777",
            "#be185d", "#9d174d", "#831843",
        ],
    ),
];

fn insert_all(theme: &mut Theme, scope: ThemeScope, entries: &[(&str, &str)]) {
    for (key, value) in entries {
        theme.insert(scope, *key, *value);
    }
}

pub fn default_theme() -> Theme {
    let mut theme = Theme::new();

    insert_all(
        &mut theme,
        ThemeScope::Colors,
        &[
            ("inherit", "inherit"),
            ("current", "currentColor"),
            ("transparent", "transparent"),
            ("black", "#000"),
            ("white", "#fff"),
        ],
    );
    for (name, values) in PALETTE {
        for (shade, value) in SHADES.iter().zip(values) {
            theme.insert(ThemeScope::Colors, format!("{}-{}", name, shade), *value);
        }
    }

    insert_all(
        &mut theme,
        ThemeScope::FontFamily,
        &[
            (
                "sans",
                "ui-sans-serif,system-ui,sans-serif,\"Apple Color Emoji\",\"Segoe UI Emoji\",\"Segoe UI Symbol\",\"Noto Color Emoji\"",
            ),
            (
                "serif",
                "ui-serif,Georgia,Cambria,\"Times New Roman\",Times,serif",
            ),
            (
                "mono",
                "ui-monospace,SFMono-Regular,Menlo,Monaco,Consolas,\"Liberation Mono\",\"Courier New\",monospace",
            ),
        ],
    );

    // size/line-height
    insert_all(
        &mut theme,
        ThemeScope::FontSize,
        &[
            ("xs", "0.75rem/1rem"),
            ("sm", "0.875rem/1.25rem"),
            ("base", "1rem/1.5rem"),
            ("lg", "1.125rem/1.75rem"),
            ("xl", "1.25rem/1.75rem"),
            ("2xl", "1.5rem/2rem"),
            ("3xl", "1.875rem/2.25rem"),
            ("4xl", "2.25rem/2.5rem"),
            ("5xl", "3rem/1"),
            ("6xl", "3.75rem/1"),
        ],
    );

    insert_all(
        &mut theme,
        ThemeScope::FontWeight,
        &[
            ("thin", "100"),
            ("extralight", "200"),
            ("light", "300"),
            ("normal", "400"),
            ("medium", "500"),
            ("semibold", "600"),
            ("bold", "700"),
            ("extrabold", "800"),
            ("black", "900"),
        ],
    );

    insert_all(
        &mut theme,
        ThemeScope::Breakpoints,
        &[
            ("sm", "640px"),
            ("md", "768px"),
            ("lg", "1024px"),
            ("xl", "1280px"),
            ("2xl", "1536px"),
        ],
    );

    insert_all(
        &mut theme,
        ThemeScope::BorderRadius,
        &[
            ("DEFAULT", "0.25rem"),
            ("none", "0"),
            ("sm", "0.125rem"),
            ("md", "0.375rem"),
            ("lg", "0.5rem"),
            ("xl", "0.75rem"),
            ("2xl", "1rem"),
            ("3xl", "1.5rem"),
            ("full", "9999px"),
        ],
    );

    insert_all(
        &mut theme,
        ThemeScope::BoxShadow,
        &[
            (
                "DEFAULT",
                "0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)",
            ),
            ("sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
            (
                "md",
                "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)",
            ),
            (
                "lg",
                "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)",
            ),
            ("none", "0 0 #0000"),
        ],
    );

    insert_all(
        &mut theme,
        ThemeScope::LineHeight,
        &[
            ("none", "1"),
            ("tight", "1.25"),
            ("snug", "1.375"),
            ("normal", "1.5"),
            ("relaxed", "1.625"),
            ("loose", "2"),
        ],
    );

    insert_all(
        &mut theme,
        ThemeScope::LetterSpacing,
        &[
            ("tighter", "-0.05em"),
            ("tight", "-0.025em"),
            ("normal", "0em"),
            ("wide", "0.025em"),
            ("wider", "0.05em"),
            ("widest", "0.1em"),
        ],
    );

    insert_all(
        &mut theme,
        ThemeScope::MaxWidth,
        &[
            ("xs", "20rem"),
            ("sm", "24rem"),
            ("md", "28rem"),
            ("lg", "32rem"),
            ("xl", "36rem"),
            ("2xl", "42rem"),
            ("prose", "65ch"),
        ],
    );

    insert_all(
        &mut theme,
        ThemeScope::Easing,
        &[
            ("DEFAULT", "cubic-bezier(0.4, 0, 0.2, 1)"),
            ("linear", "linear"),
            ("in", "cubic-bezier(0.4, 0, 1, 1)"),
            ("out", "cubic-bezier(0, 0, 0.2, 1)"),
            ("in-out", "cubic-bezier(0.4, 0, 0.2, 1)"),
        ],
    );

    for (name, keyframes, duration, timing) in [
        (
            "spin",
            "{from{transform:rotate(0deg)}to{transform:rotate(360deg)}}",
            "1s",
            "linear",
        ),
        (
            "ping",
            "{0%{transform:scale(1);opacity:1}75%,100%{transform:scale(2);opacity:0}}",
            "1s",
            "cubic-bezier(0, 0, 0.2, 1)",
        ),
        (
            "pulse",
            "{0%,100%{opacity:1}50%{opacity:.5}}",
            "2s",
            "cubic-bezier(0.4, 0, 0.6, 1)",
        ),
    ] {
        theme.insert_animation(AnimationKind::Keyframes, name, keyframes);
        theme.insert_animation(AnimationKind::Durations, name, duration);
        theme.insert_animation(AnimationKind::TimingFns, name, timing);
        theme.insert_animation(AnimationKind::Counts, name, "infinite");
    }

    theme
}
