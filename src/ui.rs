use crate::models::{HealthState, Preferences, Theme};

pub fn render_index(date: &str, state: &HealthState, prefs: &Preferences) -> String {
    let theme_attr = match prefs.theme {
        Theme::Dark => r#" data-theme="dark""#,
        Theme::Light => "",
    };
    let sidebar_class = if prefs.sidebar_collapsed { "collapsed" } else { "" };
    INDEX_HTML
        .replace("{{THEME_ATTR}}", theme_attr)
        .replace("{{THEME_CHECKED}}", if prefs.theme == Theme::Dark { "checked" } else { "" })
        .replace("{{SIDEBAR_CLASS}}", sidebar_class)
        .replace("{{DATE}}", date)
        .replace("{{SCORE}}", &state.stats.health_score.to_string())
        .replace("{{WATER}}", &state.water.daily.to_string())
        .replace("{{WATER_GOAL}}", &state.water.goal.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Health Awareness Dashboard</title>
  <style>
    :root {
      --bg: #f4f7f6;
      --card: #ffffff;
      --ink: #1f2d2b;
      --muted: #5d6b69;
      --accent: #2a9d8f;
      --water: #3a86ff;
      --exercise: #ff6b4a;
      --sleep: #8e7dbe;
      --steps: #f4a261;
      --success: #2a9d8f;
      --warning: #e9c46a;
      --error: #e76f51;
      --shadow: 0 18px 40px rgba(31, 45, 43, 0.12);
    }

    [data-theme="dark"] {
      --bg: #141a19;
      --card: #1f2726;
      --ink: #e8f0ee;
      --muted: #9fb0ad;
      --shadow: 0 18px 40px rgba(0, 0, 0, 0.45);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
      display: grid;
      grid-template-columns: 220px 1fr;
    }

    body.collapsed {
      grid-template-columns: 64px 1fr;
    }

    body.collapsed .nav-label {
      display: none;
    }

    aside {
      padding: 24px 12px;
      display: flex;
      flex-direction: column;
      gap: 10px;
      background: var(--card);
      box-shadow: var(--shadow);
    }

    aside button {
      border: none;
      background: transparent;
      color: var(--ink);
      text-align: left;
      padding: 10px 12px;
      border-radius: 10px;
      cursor: pointer;
      font: inherit;
    }

    aside button.active {
      background: var(--accent);
      color: #fff;
    }

    main {
      padding: 28px;
      display: grid;
      gap: 22px;
      align-content: start;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 16px;
      flex-wrap: wrap;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.6rem, 3vw, 2.3rem);
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(230px, 1fr));
      gap: 18px;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 20px;
      display: grid;
      gap: 12px;
    }

    .card h2 {
      margin: 0;
      font-size: 1.05rem;
    }

    .value {
      font-size: 2rem;
      font-weight: 600;
    }

    .bar {
      height: 10px;
      border-radius: 999px;
      background: rgba(127, 127, 127, 0.2);
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
      width: 0;
      transition: width 400ms ease;
    }

    .ring {
      width: 120px;
      height: 120px;
      border-radius: 50%;
      display: grid;
      place-items: center;
      margin: 0 auto;
    }

    .ring .inner {
      width: 92px;
      height: 92px;
      border-radius: 50%;
      background: var(--card);
      display: grid;
      place-items: center;
      font-weight: 600;
    }

    .row {
      display: flex;
      gap: 8px;
      flex-wrap: wrap;
    }

    input {
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid rgba(127, 127, 127, 0.35);
      background: transparent;
      color: var(--ink);
      font: inherit;
      width: 110px;
    }

    button.action {
      border: none;
      border-radius: 10px;
      padding: 9px 14px;
      background: var(--accent);
      color: #fff;
      cursor: pointer;
      font: inherit;
    }

    button.secondary {
      background: rgba(127, 127, 127, 0.25);
      color: var(--ink);
    }

    ul.plain {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    .achievement.locked {
      opacity: 0.45;
    }

    .rec-positive::before { content: "\2191  "; color: var(--success); }
    .rec-suggestion::before { content: "!  "; color: var(--warning); }
    .rec-info::before { content: "i  "; color: var(--muted); }

    .chart {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      align-items: end;
      gap: 8px;
      height: 140px;
    }

    .chart .bar-col {
      display: grid;
      gap: 6px;
      text-align: center;
      font-size: 0.8rem;
      color: var(--muted);
      align-content: end;
      height: 100%;
    }

    .chart .bar-fill {
      background: var(--accent);
      border-radius: 8px 8px 2px 2px;
    }

    section[data-section] {
      display: none;
    }

    section[data-section].visible {
      display: grid;
    }

    #toasts {
      position: fixed;
      right: 18px;
      bottom: 18px;
      display: grid;
      gap: 10px;
      z-index: 10;
    }

    .toast {
      background: var(--card);
      border-left: 5px solid var(--accent);
      box-shadow: var(--shadow);
      border-radius: 12px;
      padding: 12px 16px;
      min-width: 240px;
      animation: rise 300ms ease;
    }

    .toast.success { border-color: var(--success); }
    .toast.warning { border-color: var(--warning); }
    .toast.error { border-color: var(--error); }

    @keyframes rise {
      from { opacity: 0; transform: translateY(10px); }
      to { opacity: 1; transform: translateY(0); }
    }

    @media (max-width: 760px) {
      body, body.collapsed {
        grid-template-columns: 1fr;
      }
      aside {
        flex-direction: row;
        overflow-x: auto;
      }
    }
  </style>
</head>
<body class="{{SIDEBAR_CLASS}}"{{THEME_ATTR}}>
  <aside>
    <button type="button" id="sidebar-toggle" title="Collapse sidebar">&#9776;</button>
    <button type="button" class="active" data-target="dashboard"><span class="nav-label">Dashboard</span></button>
    <button type="button" data-target="habits"><span class="nav-label">Daily Habits</span></button>
    <button type="button" data-target="bmi"><span class="nav-label">BMI</span></button>
    <button type="button" data-target="insights"><span class="nav-label">Insights</span></button>
    <button type="button" data-target="tips"><span class="nav-label">Tips</span></button>
  </aside>

  <main>
    <header>
      <div>
        <h1 id="page-title">Health Awareness Dashboard</h1>
        <p class="subtitle">Today is <span id="date">{{DATE}}</span></p>
      </div>
      <label class="row"><input type="checkbox" id="theme-toggle" {{THEME_CHECKED}} style="width:auto" /> Dark mode</label>
    </header>

    <section data-section="dashboard" class="grid visible">
      <div class="card">
        <h2>Health score</h2>
        <span class="value" id="score">{{SCORE}}</span>
        <p class="subtitle">Daily streak: <span id="daily-streak">0</span> days</p>
      </div>
      <div class="card">
        <h2>Water</h2>
        <span class="value"><span id="water">{{WATER}}</span> / <span id="water-goal">{{WATER_GOAL}}</span></span>
        <div class="bar"><span id="water-bar" style="background: var(--water)"></span></div>
        <form class="row" id="water-form" method="post" action="/water/add">
          <button class="action" type="submit" data-water="add">+1 glass</button>
          <button class="action secondary" type="submit" formaction="/water/remove" data-water="remove">-1</button>
        </form>
        <p class="subtitle">Streak: <span id="water-streak">0</span> days</p>
      </div>
      <div class="card">
        <h2>Exercise</h2>
        <span class="value"><span id="exercise">0</span> min</span>
        <div class="bar"><span id="exercise-bar" style="background: var(--exercise)"></span></div>
        <div class="row">
          <input id="exercise-label" placeholder="Activity" />
          <input id="exercise-minutes" type="number" min="1" placeholder="Minutes" />
        </div>
        <div class="row">
          <button class="action" type="button" id="exercise-log">Log</button>
          <button class="action secondary" type="button" id="exercise-random">Quick log</button>
        </div>
        <p class="subtitle">Streak: <span id="exercise-streak">0</span> days</p>
      </div>
      <div class="card">
        <h2>Sleep</h2>
        <div class="ring" id="sleep-ring"><div class="inner"><span id="sleep">0.0</span>h</div></div>
        <div class="row">
          <input id="sleep-goal" type="number" min="4" max="12" step="0.5" placeholder="Goal (h)" />
          <button class="action secondary" type="button" id="sleep-goal-set">Set goal</button>
          <button class="action" type="button" id="sleep-log">Log sleep</button>
        </div>
      </div>
      <div class="card">
        <h2>Steps</h2>
        <span class="value" id="steps">0</span>
        <div class="bar"><span id="steps-bar" style="background: var(--steps)"></span></div>
        <div class="row">
          <input id="steps-input" type="number" min="1" max="50000" placeholder="Steps" />
          <button class="action" type="button" id="steps-add">Add</button>
        </div>
      </div>
      <div class="card">
        <h2>Mood</h2>
        <span class="value" id="mood">3</span>
        <div class="row" id="mood-buttons"></div>
      </div>
    </section>

    <section data-section="habits" class="grid">
      <div class="card">
        <h2>Progress rings</h2>
        <div class="row" id="rings"></div>
      </div>
      <div class="card">
        <h2>Achievements</h2>
        <ul class="plain" id="achievements"></ul>
      </div>
    </section>

    <section data-section="bmi" class="grid">
      <div class="card">
        <h2>BMI calculator</h2>
        <div class="row">
          <input id="height" type="number" placeholder="Height (cm)" />
          <input id="weight" type="number" placeholder="Weight (kg)" />
          <button class="action" type="button" id="bmi-calc">Calculate</button>
        </div>
        <span class="value" id="bmi-value">--</span>
        <p class="subtitle" id="bmi-category"></p>
      </div>
    </section>

    <section data-section="insights" class="grid">
      <div class="card">
        <h2>Recommendations</h2>
        <ul class="plain" id="recommendations"></ul>
      </div>
      <div class="card">
        <h2>Weekly mood</h2>
        <div class="chart" id="mood-chart"></div>
      </div>
      <div class="card">
        <h2>Day cycle</h2>
        <p class="subtitle">Streaks settle when a new day starts.</p>
        <button class="action secondary" type="button" id="advance-day">Start a new day</button>
      </div>
    </section>

    <section data-section="tips" class="grid">
      <div class="card">
        <h2>Tip of the moment</h2>
        <p id="tip">Stay hydrated by keeping a water bottle with you at all times.</p>
        <button class="action" type="button" id="tip-new">New tip</button>
      </div>
      <div class="card">
        <h2>By category</h2>
        <ul class="plain" id="category-tips"></ul>
      </div>
    </section>
  </main>

  <div id="toasts"></div>

  <script>
    const $ = (id) => document.getElementById(id);
    let lastNotice = 0;

    const toast = (message, severity) => {
      const el = document.createElement('div');
      el.className = `toast ${severity || 'info'}`;
      el.textContent = message;
      $('toasts').appendChild(el);
      setTimeout(() => el.remove(), 5000);
    };

    const setBar = (id, pct) => {
      $(id).style.width = `${Math.min(pct, 100)}%`;
    };

    const render = (data) => {
      const s = data.state;
      $('date').textContent = data.date;
      $('score').textContent = s.stats.healthScore;
      $('daily-streak').textContent = s.stats.dailyStreak;
      $('water').textContent = s.water.daily;
      $('water-goal').textContent = s.water.goal;
      $('water-streak').textContent = s.water.streak;
      $('exercise').textContent = s.exercise.minutes;
      $('exercise-streak').textContent = s.exercise.streak;
      $('sleep').textContent = s.sleep.hours.toFixed(1);
      $('steps').textContent = s.steps.daily.toLocaleString();
      $('mood').textContent = s.mood.current;
      setBar('water-bar', data.progress.water);
      setBar('exercise-bar', data.progress.exercise);
      setBar('steps-bar', data.progress.steps);
      const deg = (data.progress.sleep / 100) * 360;
      $('sleep-ring').style.background =
        `conic-gradient(var(--sleep) 0deg ${deg}deg, rgba(127,127,127,0.2) ${deg}deg 360deg)`;

      $('rings').innerHTML = ['water', 'exercise', 'sleep', 'steps']
        .map((key) => {
          const pct = Math.round(data.progress[key]);
          const d = (pct / 100) * 360;
          return `<div class="ring" style="background: conic-gradient(var(--${key}) 0deg ${d}deg, rgba(127,127,127,0.2) ${d}deg 360deg)"><div class="inner">${pct}%</div></div>`;
        })
        .join('');

      $('achievements').innerHTML = data.achievements
        .map((a) => `<li class="achievement ${a.unlocked ? '' : 'locked'}"><strong>${a.name}</strong> - ${a.description}</li>`)
        .join('');

      $('recommendations').innerHTML = data.recommendations
        .map((r) => `<li class="rec-${r.tone}">${r.text}</li>`)
        .join('');

      $('mood-chart').innerHTML = data.mood_chart
        .map((bar) => `<div class="bar-col" title="${bar.label}: ${bar.value}/5"><div class="bar-fill" style="height:${bar.height_pct}%"></div>${bar.label}</div>`)
        .join('');

      $('category-tips').innerHTML = data.tips
        .map((t) => `<li><strong>${t.category}</strong>: ${t.text}</li>`)
        .join('');

      if (s.bmi.value > 0) {
        $('bmi-value').textContent = s.bmi.value;
        $('bmi-category').textContent = s.bmi.category;
      }
    };

    const request = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const act = (url, body) =>
      request('POST', url, body || {})
        .then((res) => {
          res.notices.forEach((n) => toast(n.message, n.severity));
          render(res.dashboard);
        })
        .catch((err) => toast(err.message, 'warning'));

    const refresh = () =>
      request('GET', '/api/dashboard')
        .then(render)
        .catch((err) => toast(err.message, 'error'));

    const pollNotifications = () =>
      request('GET', `/api/notifications?after=${lastNotice}`)
        .then((entries) => {
          entries.forEach((entry) => {
            lastNotice = Math.max(lastNotice, entry.id);
            toast(entry.message, entry.severity);
          });
          if (entries.length) {
            refresh();
          }
        })
        .catch(() => {});

    document.querySelectorAll('[data-water]').forEach((button) => {
      button.addEventListener('click', (event) => {
        event.preventDefault();
        act('/api/water', { action: button.dataset.water });
      });
    });

    $('exercise-log').addEventListener('click', () => {
      act('/api/exercise', {
        label: $('exercise-label').value,
        minutes: parseInt($('exercise-minutes').value, 10) || 0
      });
    });
    $('exercise-random').addEventListener('click', () => act('/api/exercise', {}));
    $('sleep-log').addEventListener('click', () => act('/api/sleep', {}));
    $('sleep-goal-set').addEventListener('click', () => {
      act('/api/sleep/goal', { hours: parseFloat($('sleep-goal').value) || 0 });
    });
    $('steps-add').addEventListener('click', () => {
      act('/api/steps', { count: parseInt($('steps-input').value, 10) || 0 });
      $('steps-input').value = '';
    });
    $('bmi-calc').addEventListener('click', () => {
      act('/api/bmi', {
        height_cm: parseFloat($('height').value) || 0,
        weight_kg: parseFloat($('weight').value) || 0
      });
    });
    $('advance-day').addEventListener('click', () => act('/api/day/advance'));
    $('tip-new').addEventListener('click', () => {
      request('GET', '/api/tip').then((tip) => { $('tip').textContent = tip.text; });
    });

    $('mood-buttons').innerHTML = [1, 2, 3, 4, 5]
      .map((level) => `<button class="action secondary" type="button" data-mood="${level}">${level}</button>`)
      .join('');
    document.querySelectorAll('[data-mood]').forEach((button) => {
      button.addEventListener('click', () => act('/api/mood', { level: Number(button.dataset.mood) }));
    });

    $('theme-toggle').addEventListener('change', (event) => {
      const dark = event.target.checked;
      if (dark) {
        document.body.setAttribute('data-theme', 'dark');
      } else {
        document.body.removeAttribute('data-theme');
      }
      request('POST', '/api/preferences', { theme: dark ? 'dark' : 'light' })
        .then(() => toast(dark ? 'Dark mode enabled' : 'Light mode enabled', 'info'))
        .catch((err) => toast(err.message, 'error'));
    });

    $('sidebar-toggle').addEventListener('click', () => {
      const collapsed = document.body.classList.toggle('collapsed');
      request('POST', '/api/preferences', { sidebar_collapsed: collapsed }).catch(() => {});
    });

    const titles = {
      dashboard: 'Health Awareness Dashboard',
      habits: 'Daily Health Habits',
      bmi: 'BMI Calculator',
      insights: 'Health Insights',
      tips: 'Daily Health Tips'
    };
    const showSection = (name) => {
      document.querySelectorAll('section[data-section]').forEach((section) => {
        section.classList.toggle('visible', section.dataset.section === name);
      });
      document.querySelectorAll('aside [data-target]').forEach((button) => {
        button.classList.toggle('active', button.dataset.target === name);
      });
      $('page-title').textContent = titles[name];
    };
    document.querySelectorAll('aside [data-target]').forEach((button) => {
      button.addEventListener('click', () => showSection(button.dataset.target));
    });

    document.addEventListener('keydown', (event) => {
      if (!(event.ctrlKey || event.metaKey)) {
        return;
      }
      const shortcuts = {
        w: () => act('/api/water', { action: 'add' }),
        e: () => act('/api/exercise', {}),
        s: () => act('/api/sleep', {}),
        m: () => act('/api/mood', {}),
        b: () => showSection('bmi')
      };
      const handler = shortcuts[event.key];
      if (handler) {
        event.preventDefault();
        handler();
      }
    });

    refresh();
    pollNotifications();
    setInterval(pollNotifications, 5000);
  </script>
</body>
</html>
"#;
