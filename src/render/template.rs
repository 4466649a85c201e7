pub const PAGE: &str = r#"<!DOCTYPE html>
<html lang="ar" dir="rtl">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>أخبار الألعاب</title>
    <link href="https://fonts.googleapis.com/css2?family=Cairo:wght@400;600;800&display=swap" rel="stylesheet">
    <style>
        :root { --bg: #0f172a; --card-bg: #1e293b; --text: #f1f5f9; --accent: #38bdf8; --date: #94a3b8; }
        body { background-color: var(--bg); color: var(--text); font-family: 'Cairo', sans-serif; margin: 0; padding: 20px; }
        .container { max-width: 900px; margin: 0 auto; }
        header { text-align: center; margin-bottom: 30px; border-bottom: 1px solid #334155; padding-bottom: 20px; }
        h1 { margin: 0; font-size: 2rem; color: var(--accent); }
        .subtitle { color: var(--date); font-size: 0.9rem; margin-top: 5px; }
        .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 20px; }
        .card { background: var(--card-bg); border-radius: 12px; overflow: hidden; border: 1px solid #334155; display: flex; flex-direction: column; }
        .card:hover { border-color: var(--accent); transform: translateY(-3px); transition: 0.2s; }
        .card img { width: 100%; height: 160px; object-fit: cover; background: #000; }
        .content { padding: 15px; flex-grow: 1; display: flex; flex-direction: column; }
        .source { color: var(--accent); font-size: 0.75rem; font-weight: bold; text-transform: uppercase; margin-bottom: 5px; }
        .lang-tag { display: inline-block; font-size: 0.65rem; background: #fbbf24; color: #0f172a; border-radius: 4px; padding: 0 6px; margin-inline-start: 6px; }
        .card[data-language="original"] h2, .card[data-language="original"] p { direction: ltr; text-align: left; }
        h2 { font-size: 1.1rem; margin: 0 0 10px 0; line-height: 1.4; }
        ul, p { font-size: 0.85rem; color: #cbd5e1; flex-grow: 1; margin: 0; }
        .date-tag { font-size: 0.7rem; color: #64748b; margin-top: 10px; }
        .empty-state { text-align: center; font-size: 1.2rem; color: #fbbf24; margin-top: 50px; }
        a { text-decoration: none; color: inherit; display: block; height: 100%; }
    </style>
</head>
<body>
<div class="container">
    <header>
        <h1>⚡ أخبار الألعاب</h1>
        <div class="subtitle">{{source_label}}</div>
        <div class="subtitle">آخر تحديث: {{generated_at}}</div>
    </header>
{{content}}
</div>
</body>
</html>
"#;

pub const EMPTY_STATE: &str = r#"    <div class="empty-state">لم يتم العثور على أخبار · No content found</div>"#;

pub const ORIGINAL_TAG: &str = r#"<span class="lang-tag">EN</span>"#;
