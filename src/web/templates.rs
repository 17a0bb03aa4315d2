//! Built-in HTML templates and the response wrapper that renders them.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::{Environment, Value};

const BASE: &str = r##"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{% block title %}YaNote{% endblock %}</title>
</head>
<body>
    <header>
        <nav>
            <a href="/">YaNote</a>
            {% if user %}
            <a href="/notes/">Все заметки</a>
            <a href="/add/">Добавить заметку</a>
            <span class="user">{{ user.username }}</span>
            <form method="post" action="/auth/logout/" class="logout">
                <button type="submit">Выйти</button>
            </form>
            {% else %}
            <a href="/auth/login/">Войти</a>
            <a href="/auth/signup/">Регистрация</a>
            {% endif %}
        </nav>
    </header>
    <main>{% block content %}{% endblock %}</main>
</body>
</html>"##;

const HOME: &str = r##"{% extends "base.html" %}
{% block content %}
<h1>YaNote</h1>
<p>Сервис для хранения личных заметок.</p>
{% if not user %}<p><a href="/auth/login/">Войдите</a>, чтобы начать.</p>{% endif %}
{% endblock %}"##;

const LIST: &str = r##"{% extends "base.html" %}
{% block title %}Заметки{% endblock %}
{% block content %}
<h1>Ваши заметки</h1>
{% if object_list %}
<ul class="notes">
    {% for note in object_list %}
    <li><a href="/note/{{ note.slug }}/">{{ note.title }}</a></li>
    {% endfor %}
</ul>
{% else %}
<p>Заметок пока нет.</p>
{% endif %}
<p><a href="/add/">Добавить заметку</a></p>
{% endblock %}"##;

const FORM: &str = r##"{% extends "base.html" %}
{% block title %}{% if form.instance %}Редактировать{% else %}Новая заметка{% endif %}{% endblock %}
{% block content %}
<h1>{% if form.instance %}Редактировать заметку{% else %}Добавить заметку{% endif %}</h1>
<form method="post" action="{% if form.instance %}/edit/{{ form.instance.slug }}/{% else %}/add/{% endif %}">
    <p>
        <label for="id_title">Заголовок</label>
        <input type="text" name="title" id="id_title" maxlength="100" value="{{ form.data.title }}">
        {% for e in form.errors.title %}<span class="error">{{ e }}</span>{% endfor %}
    </p>
    <p>
        <label for="id_text">Текст</label>
        <textarea name="text" id="id_text">{{ form.data.text }}</textarea>
        {% for e in form.errors.text %}<span class="error">{{ e }}</span>{% endfor %}
    </p>
    <p>
        <label for="id_slug">Адрес для страницы с заметкой</label>
        <input type="text" name="slug" id="id_slug" maxlength="100" value="{{ form.data.slug }}">
        <small>Укажите адрес для страницы заметки. Используйте только латиницу, цифры, дефисы и знаки подчёркивания</small>
        {% for e in form.errors.slug %}<span class="error">{{ e }}</span>{% endfor %}
    </p>
    <button type="submit">Сохранить</button>
</form>
{% endblock %}"##;

const SUCCESS: &str = r##"{% extends "base.html" %}
{% block content %}
<h1>Успешно!</h1>
<p><a href="/notes/">Вернуться к списку заметок</a></p>
{% endblock %}"##;

const DETAIL: &str = r##"{% extends "base.html" %}
{% block title %}{{ note.title }}{% endblock %}
{% block content %}
<article>
    <h1>{{ note.title }}</h1>
    <div class="text">{{ text_html }}</div>
</article>
<p>
    <a href="/edit/{{ note.slug }}/">Редактировать</a>
    <a href="/delete/{{ note.slug }}/">Удалить</a>
</p>
{% endblock %}"##;

const DELETE: &str = r##"{% extends "base.html" %}
{% block title %}Удаление{% endblock %}
{% block content %}
<h1>Удалить заметку «{{ note.title }}»?</h1>
<form method="post" action="/delete/{{ note.slug }}/">
    <button type="submit">Удалить</button>
    <a href="/note/{{ note.slug }}/">Отмена</a>
</form>
{% endblock %}"##;

const LOGIN: &str = r##"{% extends "base.html" %}
{% block title %}Вход{% endblock %}
{% block content %}
<h1>Войти</h1>
{% for e in form.errors["__all__"] %}<p class="error">{{ e }}</p>{% endfor %}
<form method="post" action="/auth/login/">
    <input type="hidden" name="next" value="{{ next }}">
    <p>
        <label for="id_username">Имя пользователя</label>
        <input type="text" name="username" id="id_username" value="{{ form.username }}">
        {% for e in form.errors.username %}<span class="error">{{ e }}</span>{% endfor %}
    </p>
    <p>
        <label for="id_password">Пароль</label>
        <input type="password" name="password" id="id_password">
        {% for e in form.errors.password %}<span class="error">{{ e }}</span>{% endfor %}
    </p>
    <button type="submit">Войти</button>
</form>
<p><a href="/auth/signup/">Регистрация</a></p>
{% endblock %}"##;

const LOGOUT: &str = r##"{% extends "base.html" %}
{% block title %}Выход{% endblock %}
{% block content %}
<h1>Вы вышли из своей учётной записи.</h1>
<p><a href="/auth/login/">Войти снова</a></p>
{% endblock %}"##;

const SIGNUP: &str = r##"{% extends "base.html" %}
{% block title %}Регистрация{% endblock %}
{% block content %}
<h1>Регистрация</h1>
<form method="post" action="/auth/signup/">
    <p>
        <label for="id_username">Имя пользователя</label>
        <input type="text" name="username" id="id_username" maxlength="150" value="{{ form.username }}">
        {% for e in form.errors.username %}<span class="error">{{ e }}</span>{% endfor %}
    </p>
    <p>
        <label for="id_password1">Пароль</label>
        <input type="password" name="password1" id="id_password1">
        {% for e in form.errors.password1 %}<span class="error">{{ e }}</span>{% endfor %}
    </p>
    <p>
        <label for="id_password2">Подтверждение пароля</label>
        <input type="password" name="password2" id="id_password2">
        {% for e in form.errors.password2 %}<span class="error">{{ e }}</span>{% endfor %}
    </p>
    <button type="submit">Зарегистрироваться</button>
</form>
{% endblock %}"##;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", BASE),
    ("notes/home.html", HOME),
    ("notes/list.html", LIST),
    ("notes/form.html", FORM),
    ("notes/success.html", SUCCESS),
    ("notes/detail.html", DETAIL),
    ("notes/delete.html", DELETE),
    ("registration/login.html", LOGIN),
    ("registration/logout.html", LOGOUT),
    ("registration/signup.html", SIGNUP),
];

/// Record of which template produced a response and with what context.
///
/// Attached to every rendered response as an extension so tests can inspect
/// the page without scraping HTML.
#[derive(Debug, Clone)]
pub struct RenderedTemplate {
    pub name: &'static str,
    pub context: Value,
}

/// The compiled template set.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Parses every built-in template.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Renders `name` to a 200 response.
    pub fn render(&self, name: &'static str, context: Value) -> Result<Response, minijinja::Error> {
        let html = self.env.get_template(name)?.render(&context)?;
        let mut response = (StatusCode::OK, Html(html)).into_response();
        response
            .extensions_mut()
            .insert(RenderedTemplate { name, context });
        Ok(response)
    }
}
