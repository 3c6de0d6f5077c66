//! Server-rendered marketing page. Every string comes from the locale's
//! message catalog and is escaped on the way out.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::locale::Locale;
use crate::utils::messages::MessageCatalog;

const FEATURE_ITEMS: [&str; 4] = ["health", "walk", "diary", "reminder"];
const AI_ITEMS: [&str; 2] = ["symptom", "report"];
const COMMUNITY_ITEMS: [&str; 2] = ["share", "nearby"];
const GAMIFICATION_STATS: [(&str, &str); 5] = [
    ("level", "12"),
    ("exp", "2,480"),
    ("streak", "21"),
    ("points", "1,350"),
    ("gems", "48"),
];

/// Everything a page needs besides its copy.
pub struct PageContext<'a> {
    pub locale: Locale,
    pub messages: &'a MessageCatalog,
    /// Locale switcher target and its label.
    pub switch_href: String,
    pub switch_label: &'static str,
    pub home_href: String,
}

impl PageContext<'_> {
    /// Escaped catalog text with line breaks preserved.
    fn text(&self, key: &str) -> String {
        encode_text(self.messages.get(key)).replace('\n', "<br/>")
    }

    fn attr(&self, key: &str) -> String {
        encode_double_quoted_attribute(self.messages.get(key)).into_owned()
    }
}

const THEME_SCRIPT: &str = r#"<script>
(function () {
  try {
    var stored = localStorage.getItem('theme');
    var dark = stored ? stored === 'dark' : window.matchMedia('(prefers-color-scheme: dark)').matches;
    document.documentElement.classList.toggle('dark', dark);
  } catch (e) {}
})();
function toggleTheme() {
  var dark = document.documentElement.classList.toggle('dark');
  try { localStorage.setItem('theme', dark ? 'dark' : 'light'); } catch (e) {}
}
</script>"#;

const REVEAL_SCRIPT: &str = r#"<script>
(function () {
  var items = document.querySelectorAll('.fade-in');
  if (!('IntersectionObserver' in window)) {
    items.forEach(function (el) { el.classList.add('visible'); });
    return;
  }
  var observer = new IntersectionObserver(function (entries) {
    entries.forEach(function (entry) {
      if (entry.isIntersecting) {
        entry.target.classList.add('visible');
        observer.unobserve(entry.target);
      }
    });
  }, { threshold: 0.15 });
  items.forEach(function (el) { observer.observe(el); });
})();
</script>"#;

const PAGE_CSS: &str = r#"<style>
:root { --background: #ffffff; --foreground: #1c1917; --muted: #f5f5f4; --muted-foreground: #78716c; --primary: #f97316; }
html.dark { --background: #0c0a09; --foreground: #fafaf9; --muted: #1c1917; --muted-foreground: #a8a29e; }
body { margin: 0; font-family: 'Pretendard Variable', Inter, sans-serif; background: var(--background); color: var(--foreground); }
a { color: inherit; }
.container { max-width: 1120px; margin: 0 auto; padding: 0 1.5rem; }
.site-header { position: sticky; top: 0; backdrop-filter: blur(12px); border-bottom: 1px solid var(--muted); }
.site-header nav { display: flex; align-items: center; justify-content: space-between; height: 4rem; }
.nav-links a { margin-right: 1.25rem; text-decoration: none; color: var(--muted-foreground); }
.nav-actions { display: flex; gap: .5rem; align-items: center; }
.locale-switcher, .theme-toggle { border: 0; background: none; border-radius: .5rem; padding: .375rem .625rem; color: var(--muted-foreground); cursor: pointer; text-decoration: none; font-weight: 600; }
section { padding: 6rem 0; }
.badge { display: inline-block; border-radius: 999px; padding: .25rem .75rem; background: var(--muted); color: var(--primary); font-size: .875rem; font-weight: 600; }
.gradient-text { background: linear-gradient(90deg, #f97316, #ec4899); -webkit-background-clip: text; -webkit-text-fill-color: transparent; }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 1.25rem; margin-top: 2.5rem; }
.card { border-radius: 1.25rem; padding: 1.5rem; background: var(--muted); }
.stats { display: flex; flex-wrap: wrap; gap: 1rem; margin-top: 2rem; }
.stat { border-radius: 1rem; padding: 1rem 1.5rem; background: var(--muted); text-align: center; }
.button { display: inline-block; border-radius: .75rem; padding: .875rem 1.5rem; font-weight: 600; text-decoration: none; background: var(--primary); color: #fff; }
.button.outline { background: none; border: 1px solid var(--muted-foreground); color: var(--foreground); }
.fade-in { opacity: 0; transform: translateY(24px); transition: opacity .6s ease, transform .6s ease; }
.fade-in.visible { opacity: 1; transform: none; }
.site-footer { padding: 3rem 0; border-top: 1px solid var(--muted); color: var(--muted-foreground); }
.footer-columns { display: flex; flex-wrap: wrap; gap: 3rem; }
</style>"#;

fn shell(ctx: &PageContext<'_>, body: &str) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1"/>
<title>{title}</title>
<meta name="description" content="{description}"/>
<meta property="og:title" content="{title}"/>
<meta property="og:description" content="{description}"/>
<meta property="og:site_name" content="keenylog"/>
<meta property="og:type" content="website"/>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/gh/orioncactus/pretendard@v1.3.9/dist/web/variable/pretendardvariable-dynamic-subset.min.css"/>
{theme}
{css}
</head>
<body>
"#,
        lang = ctx.locale,
        title = ctx.text("metadata.title"),
        description = ctx.attr("metadata.description"),
        theme = THEME_SCRIPT,
        css = PAGE_CSS,
    ));
    html.push_str(&header(ctx));
    html.push_str(body);
    html.push_str(&footer(ctx));
    html.push_str(REVEAL_SCRIPT);
    html.push_str("\n</body>\n</html>\n");
    html
}

fn header(ctx: &PageContext<'_>) -> String {
    format!(
        r##"<header class="site-header"><nav class="container">
<a class="logo" href="{home}"><strong>keenylog</strong></a>
<div class="nav-links">
<a href="#features">{features}</a><a href="#ai">{ai}</a><a href="#community">{community}</a><a href="#download">{download}</a>
</div>
<div class="nav-actions">
<a class="locale-switcher" href="{switch_href}">{switch_label}</a>
<button class="theme-toggle" type="button" onclick="toggleTheme()" aria-label="{toggle}">&#9788;</button>
</div>
</nav></header>
"##,
        home = encode_double_quoted_attribute(&ctx.home_href),
        features = ctx.text("header.features"),
        ai = ctx.text("header.aiShowcase"),
        community = ctx.text("header.community"),
        download = ctx.text("header.download"),
        switch_href = encode_double_quoted_attribute(&ctx.switch_href),
        switch_label = ctx.switch_label,
        toggle = ctx.attr("header.themeToggle"),
    )
}

fn footer(ctx: &PageContext<'_>) -> String {
    format!(
        r##"<footer class="site-footer"><div class="container footer-columns">
<div><strong>keenylog</strong><p>{tagline}</p></div>
<div><h4>{product}</h4><a href="#features">{features}</a><br/><a href="#download">{pricing}</a><br/><a href="#faq">{faq}</a></div>
<div><h4>{support}</h4><a href="mailto:hello@keenylog.com">{contact}</a></div>
<div><h4>{legal}</h4><a href="#privacy">{privacy}</a><br/><a href="#terms">{terms}</a></div>
</div><div class="container"><p>{copyright}</p></div></footer>
"##,
        tagline = ctx.text("footer.tagline"),
        product = ctx.text("footer.product"),
        features = ctx.text("footer.features"),
        pricing = ctx.text("footer.pricing"),
        faq = ctx.text("footer.faq"),
        support = ctx.text("footer.support"),
        contact = ctx.text("footer.contact"),
        legal = ctx.text("footer.legal"),
        privacy = ctx.text("footer.privacy"),
        terms = ctx.text("footer.terms"),
        copyright = ctx.text("footer.copyright"),
    )
}

fn section_heading(ctx: &PageContext<'_>, namespace: &str) -> String {
    format!(
        r#"<div class="fade-in"><span class="badge">{badge}</span><h2>{title}</h2><p>{subtitle}</p></div>"#,
        badge = ctx.text(&format!("{}.sectionBadge", namespace)),
        title = ctx.text(&format!("{}.sectionTitle", namespace)),
        subtitle = ctx.text(&format!("{}.sectionSubtitle", namespace)),
    )
}

fn cards(ctx: &PageContext<'_>, namespace: &str, items: &[&str]) -> String {
    let mut html = String::from(r#"<div class="cards">"#);
    for item in items {
        html.push_str(&format!(
            r#"<article class="card fade-in"><h3>{title}</h3><p>{description}</p></article>"#,
            title = ctx.text(&format!("{}.items.{}.title", namespace, item)),
            description = ctx.text(&format!("{}.items.{}.description", namespace, item)),
        ));
    }
    html.push_str("</div>");
    html
}

fn hero(ctx: &PageContext<'_>) -> String {
    format!(
        r##"<section class="hero"><div class="container fade-in">
<span class="badge">{badge}</span>
<h1>{title}<br/><span class="gradient-text">{highlight}</span></h1>
<p>{subtitle}</p>
<a class="button" href="#download">{primary}</a>
<a class="button outline" href="#features">{secondary}</a>
</div></section>
"##,
        badge = ctx.text("hero.badge"),
        title = ctx.text("hero.title"),
        highlight = ctx.text("hero.titleHighlight"),
        subtitle = ctx.text("hero.subtitle"),
        primary = ctx.text("hero.cta_primary"),
        secondary = ctx.text("hero.cta_secondary"),
    )
}

fn gamification(ctx: &PageContext<'_>) -> String {
    let mut stats = String::from(r#"<div class="stats">"#);
    for (key, sample) in GAMIFICATION_STATS {
        stats.push_str(&format!(
            r#"<div class="stat fade-in"><strong>{sample}</strong><div>{label}</div></div>"#,
            label = ctx.text(&format!("gamification.{}", key)),
        ));
    }
    stats.push_str("</div>");
    format!(
        "<section id=\"gamification\"><div class=\"container\">{}{}</div></section>\n",
        section_heading(ctx, "gamification"),
        stats
    )
}

fn download(ctx: &PageContext<'_>) -> String {
    format!(
        r#"<section id="download"><div class="container fade-in">
<span class="badge">{free}</span>
<h2>{title}</h2>
<p>{subtitle}</p>
<a class="button" href="https://apps.apple.com/app/keenylog">{app_store}</a>
<a class="button outline" href="https://play.google.com/store/apps/details?id=com.keenylog.app">{play_store}</a>
</div></section>
"#,
        free = ctx.text("download.free"),
        title = ctx.text("download.title"),
        subtitle = ctx.text("download.subtitle"),
        app_store = ctx.text("download.appStore"),
        play_store = ctx.text("download.playStore"),
    )
}

pub fn render_landing(ctx: &PageContext<'_>) -> String {
    let mut main = String::from("<main>\n");
    main.push_str(&hero(ctx));
    main.push_str(&format!(
        "<section id=\"features\"><div class=\"container\">{}{}</div></section>\n",
        section_heading(ctx, "features"),
        cards(ctx, "features", &FEATURE_ITEMS)
    ));
    main.push_str(&format!(
        "<section id=\"ai\"><div class=\"container\">{}{}</div></section>\n",
        section_heading(ctx, "aiShowcase"),
        cards(ctx, "aiShowcase", &AI_ITEMS)
    ));
    main.push_str(&gamification(ctx));
    main.push_str(&format!(
        "<section id=\"community\"><div class=\"container\">{}{}</div></section>\n",
        section_heading(ctx, "community"),
        cards(ctx, "community", &COMMUNITY_ITEMS)
    ));
    main.push_str(&download(ctx));
    main.push_str("</main>\n");
    shell(ctx, &main)
}

pub fn render_not_found(ctx: &PageContext<'_>) -> String {
    let body = format!(
        r#"<main><section><div class="container">
<h1>{title}</h1>
<p>{description}</p>
<a class="button" href="{home}">{home_label}</a>
</div></section></main>
"#,
        title = ctx.text("notFound.title"),
        description = ctx.text("notFound.description"),
        home = encode_double_quoted_attribute(&ctx.home_href),
        home_label = ctx.text("notFound.home"),
    );
    shell(ctx, &body)
}
