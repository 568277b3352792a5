use crate::render::view::ReportData;

/// Render a self-contained HTML report (data embedded as JSON, charts drawn
/// as inline SVG by the embedded script).
///
/// The template is filled with `replace` rather than `format!()` because the
/// script is full of `{}` from JS template literals.
pub fn render_html_report(data: &ReportData) -> anyhow::Result<String> {
    // `</` would let a value close the script element early.
    let json = serde_json::to_string(data)?.replace("</", "<\\/");

    const TEMPLATE: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Log Plots</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }
  .grid { display: flex; flex-wrap: wrap; gap: 16px; padding: 16px; }
  .card { border: 1px solid #ddd; border-radius: 8px; padding: 8px 12px; }
  .card h3 { margin: 4px 0; font-size: 15px; }
  .muted { color: #777; font-size: 12px; }
  svg text { font-size: 11px; fill: #333; }
  .axis { stroke: #888; stroke-width: 1; }
  .series { fill: none; stroke: #1f77b4; stroke-width: 1.5; }
  .bar { fill: #1f77b4; stroke: black; stroke-width: 0.7; }
  .dot { fill: #1f77b4; }
  .wedge { stroke: black; stroke-width: 1; }
  @media print { .card { break-inside: avoid; } }
</style>
</head>
<body>
<header>
  <div class="summary" id="summary"></div>
</header>
<div class="grid" id="charts"></div>

<script>
// Embedded report data (JSON object literal)
const DATA = __DATA__;

const W = 480, H = 280, PAD = { l: 56, r: 12, t: 12, b: 40 };
const PALETTE = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
                 "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf"];
const NS = "http://www.w3.org/2000/svg";

function el(name, attrs, text) {
  const e = document.createElementNS(NS, name);
  for (const [k, v] of Object.entries(attrs || {})) e.setAttribute(k, v);
  if (text !== undefined) e.textContent = text;
  return e;
}

function fmt(x) {
  return Math.abs(x) >= 1000 || Number.isInteger(x) ? String(Math.round(x)) : x.toFixed(2);
}

function renderSummary() {
  const t = DATA.totals;
  document.getElementById("summary").innerHTML = `
    <span class="pill">titles: <b>${t.titles}</b></span>
    <span class="pill">series: <b>${t.series}</b></span>
    <span class="pill">charts: <b>${t.charts}</b></span>
    <span class="pill">omitted: <b>${t.omitted}</b></span>
    <span class="pill">lines: <b>${t.lines}</b></span>
    <span class="pill">lines with data: <b>${t.accepted_lines}</b></span>
    <span class="pill">lines dropped: <b>${t.dropped_lines}</b></span>
  `;
}

// x is the occurrence index (1..N); bars and stairs occupy [i, i+1).
function renderPoints(svg, chart) {
  const pts = chart.points;
  const n = pts.length;
  const lo = chart.y_min, hi = chart.y_max;
  const stepped = chart.chart_type === "Bar" || chart.chart_type === "Stairs";
  const xMax = stepped ? n : Math.max(n, 2);
  const xMin = stepped ? 0 : 1;
  const sx = x => PAD.l + (x - xMin) / (xMax - xMin) * (W - PAD.l - PAD.r);
  const sy = y => H - PAD.b - (y - lo) / (hi - lo) * (H - PAD.t - PAD.b);

  svg.appendChild(el("line", { class: "axis", x1: PAD.l, y1: H - PAD.b, x2: W - PAD.r, y2: H - PAD.b }));
  svg.appendChild(el("line", { class: "axis", x1: PAD.l, y1: PAD.t, x2: PAD.l, y2: H - PAD.b }));
  for (const y of [lo, (lo + hi) / 2, hi]) {
    svg.appendChild(el("text", { x: PAD.l - 6, y: sy(y) + 4, "text-anchor": "end" }, fmt(y)));
  }
  const every = Math.max(1, Math.ceil(n / 10));
  for (let i = 1; i <= n; i += every) {
    const x = stepped ? sx(i - 0.5) : sx(i);
    svg.appendChild(el("text", { x: x, y: H - PAD.b + 14, "text-anchor": "middle" }, i));
  }
  svg.appendChild(el("text", { x: (W + PAD.l) / 2, y: H - 6, "text-anchor": "middle" }, DATA.x_label));
  svg.appendChild(el("text", { x: 12, y: H / 2, transform: `rotate(-90 12 ${H / 2})`, "text-anchor": "middle" }, chart.label));

  switch (chart.chart_type) {
    case "Line": {
      let d = "", pen = false;
      pts.forEach((v, i) => {
        if (v === null) { pen = false; return; }
        d += `${pen ? "L" : "M"}${sx(i + 1)},${sy(v)} `;
        pen = true;
      });
      svg.appendChild(el("path", { class: "series", d: d }));
      break;
    }
    case "Scatter":
      pts.forEach((v, i) => {
        if (v !== null) svg.appendChild(el("circle", { class: "dot", cx: sx(i + 1), cy: sy(v), r: 3 }));
      });
      break;
    case "Bar":
      pts.forEach((v, i) => {
        if (v === null) return;
        const y0 = sy(0), y1 = sy(v);
        svg.appendChild(el("rect", { class: "bar", x: sx(i), y: Math.min(y0, y1), width: sx(i + 1) - sx(i), height: Math.abs(y1 - y0) }));
      });
      break;
    case "Stairs": {
      let d = "", prev = null;
      pts.forEach((v, i) => {
        if (v === null) { prev = null; return; }
        d += prev === null ? `M${sx(i)},${sy(v)} ` : `L${sx(i)},${sy(v)} `;
        d += `L${sx(i + 1)},${sy(v)} `;
        prev = v;
      });
      svg.appendChild(el("path", { class: "series", d: d }));
      break;
    }
  }
}

function renderSlices(svg, chart) {
  const total = chart.slices.reduce((s, x) => s + x.count, 0);
  const cx = W / 2 - 60, cy = H / 2, r = Math.min(W, H) / 2 - 20;
  let a0 = -Math.PI / 2;
  chart.slices.forEach((s, i) => {
    const frac = s.count / total;
    const a1 = a0 + frac * 2 * Math.PI;
    const color = PALETTE[i % PALETTE.length];
    if (chart.slices.length === 1) {
      svg.appendChild(el("circle", { class: "wedge", cx: cx, cy: cy, r: r, fill: color }));
    } else {
      const large = a1 - a0 > Math.PI ? 1 : 0;
      const d = `M${cx},${cy} L${cx + r * Math.cos(a0)},${cy + r * Math.sin(a0)} ` +
                `A${r},${r} 0 ${large} 1 ${cx + r * Math.cos(a1)},${cy + r * Math.sin(a1)} Z`;
      svg.appendChild(el("path", { class: "wedge", d: d, fill: color }));
    }
    const mid = (a0 + a1) / 2;
    svg.appendChild(el("text", { x: cx + r * 0.6 * Math.cos(mid), y: cy + r * 0.6 * Math.sin(mid), "text-anchor": "middle" },
      `${(frac * 100).toFixed(1)}%`));
    svg.appendChild(el("rect", { x: W - 130, y: 20 + i * 18, width: 10, height: 10, fill: color }));
    svg.appendChild(el("text", { x: W - 115, y: 29 + i * 18 }, `${s.value} (${s.count})`));
    a0 = a1;
  });
}

function renderCharts() {
  const root = document.getElementById("charts");
  for (const chart of DATA.charts) {
    const card = document.createElement("div");
    card.className = "card";
    const h = document.createElement("h3");
    h.textContent = chart.heading;
    card.appendChild(h);
    const meta = document.createElement("div");
    meta.className = "muted";
    meta.textContent = `Figure ${chart.figure} | ${chart.chart_type} | ${chart.label} | ${chart.observations} observation${chart.observations === 1 ? "" : "s"}`;
    card.appendChild(meta);

    const svg = el("svg", { width: W, height: H, viewBox: `0 0 ${W} ${H}` });
    if (chart.kind === "slices") renderSlices(svg, chart);
    else renderPoints(svg, chart);
    card.appendChild(svg);
    root.appendChild(card);
  }
}

renderSummary();
renderCharts();
</script>
</body>
</html>
"##;

    Ok(TEMPLATE.replace("__DATA__", &json))
}
